use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span, Text},
};

/// A key combination and what it does
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub keys: Vec<&'static str>,
    pub description: String,
}

impl KeyBinding {
    pub fn new(keys: &[&'static str], description: impl Into<String>) -> Self {
        KeyBinding {
            keys: keys.to_vec(),
            description: description.into(),
        }
    }
}

/// Help text for the widget currently handling keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageInfo {
    pub description: Option<String>,
    pub bindings: Vec<KeyBinding>,
}

pub trait HasUsageInfo {
    fn usage_info(&self) -> UsageInfo;
}

impl UsageInfo {
    pub fn to_text<'a>(&self, key_style: Style) -> Text<'a> {
        let mut lines: Vec<Line> = Vec::with_capacity(self.bindings.len() + 1);
        if let Some(description) = self.description.as_ref() {
            lines.push(Line::from(description.clone()));
        }

        for binding in &self.bindings {
            let mut spans: Vec<Span> = Vec::with_capacity(binding.keys.len() * 2 + 1);
            for (idx, key) in binding.keys.iter().enumerate() {
                if idx > 0 {
                    spans.push(Span::raw("/"));
                }
                spans.push(Span::styled(format!("({key})"), key_style).bold());
            }
            spans.push(Span::raw(format!(" {}", binding.description)));

            lines.push(Line::from(spans));
        }

        Text::from(lines)
    }
}
