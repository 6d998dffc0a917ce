//! Form field value objects

/// How a field's raw input is interpreted and validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Non-negative decimal number
    Decimal,
    /// Whole number
    Integer,
    /// Calendar date written as YYYY-MM-DD
    Date,
    /// Absolute URL (or a local file path pending upload)
    Url,
    /// Comma-separated record identifiers
    IdList,
    /// One of a fixed option list
    Choice,
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Choice {
        options: &'static [&'static str],
        /// `None` until one of `options` is picked
        selected: Option<usize>,
    },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Shown when a choice field holds a value outside its options
pub const CHOICE_REQUIRED: &str = "Choose one of the options";

/// Validation constraints for a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub required: bool,
    /// Inclusive lower bound for numeric kinds
    pub min: Option<f64>,
    /// Message shown when the field is empty but required
    pub required_message: &'static str,
    /// Message shown when the value is out of range or malformed
    pub invalid_message: &'static str,
}

impl FieldRule {
    pub const fn optional() -> Self {
        Self {
            required: false,
            min: None,
            required_message: "",
            invalid_message: "",
        }
    }

    pub const fn required(message: &'static str) -> Self {
        Self {
            required: true,
            min: None,
            required_message: message,
            invalid_message: message,
        }
    }

    pub const fn at_least(
        min: f64,
        required_message: &'static str,
        invalid_message: &'static str,
    ) -> Self {
        Self {
            required: true,
            min: Some(min),
            required_message,
            invalid_message,
        }
    }

    pub const fn invalid(mut self, message: &'static str) -> Self {
        self.invalid_message = message;
        self
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: FieldValue,
    pub rule: FieldRule,
    pub is_multiline: bool,
    /// Set once the user has edited the field
    pub touched: bool,
}

impl FormField {
    /// Create a new text-input field of the given kind
    pub fn input(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        rule: FieldRule,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            value: FieldValue::Text(String::new()),
            rule,
            is_multiline: false,
            touched: false,
        }
    }

    /// Create a new multiline text field
    pub fn multiline(name: &'static str, label: &'static str, rule: FieldRule) -> Self {
        Self {
            is_multiline: true,
            ..Self::input(name, label, FieldKind::Text, rule)
        }
    }

    /// Create a new choice field preselecting `default`
    pub fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        default: &str,
    ) -> Self {
        let selected = options.iter().position(|o| *o == default);
        Self {
            name,
            label,
            kind: FieldKind::Choice,
            value: FieldValue::Choice { options, selected },
            rule: FieldRule::required(CHOICE_REQUIRED),
            is_multiline: false,
            touched: false,
        }
    }

    /// Builder-style initial text value
    pub fn with_text(mut self, value: impl Into<String>) -> Self {
        self.set_text(value.into());
        self.touched = false;
        self
    }

    /// Get the text value (returns the selected option for choice fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice { options, selected } => {
                selected.and_then(|i| options.get(i)).copied().unwrap_or("")
            }
        }
    }

    /// Set the text value; for choice fields selects the matching option,
    /// or clears the selection when none matches
    pub fn set_text(&mut self, value: String) {
        match &mut self.value {
            FieldValue::Text(s) => *s = value,
            FieldValue::Choice { options, selected } => {
                *selected = options.iter().position(|o| o.eq_ignore_ascii_case(&value));
            }
        }
        self.touched = true;
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => s.push(c),
            FieldValue::Choice { .. } => return,
        }
        self.touched = true;
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
            self.touched = true;
        }
    }

    /// Select the next option of a choice field (wraps around)
    pub fn next_option(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if !options.is_empty() {
                *selected = Some(selected.map_or(0, |i| (i + 1) % options.len()));
                self.touched = true;
            }
        }
    }

    /// Select the previous option of a choice field (wraps around)
    pub fn prev_option(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if !options.is_empty() {
                *selected = Some(match *selected {
                    Some(i) if i > 0 => i - 1,
                    _ => options.len() - 1,
                });
                self.touched = true;
            }
        }
    }

    /// True when the field holds no input
    pub fn is_blank(&self) -> bool {
        match &self.value {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Choice { selected, .. } => selected.is_none(),
        }
    }

    /// Identifiers of an id-list field, in input order, without blanks
    pub fn as_id_list(&self) -> Vec<String> {
        self.as_text()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice { options, selected } => {
                match selected.and_then(|i| options.get(i)) {
                    Some(current) => format!("◂ {current} ▸"),
                    None => "◂ unknown ▸".to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &[&str] = &["paid", "pending", "refunded"];

    #[test]
    fn test_push_and_pop_mark_touched() {
        let mut field = FormField::input("name", "Name", FieldKind::Text, FieldRule::optional());
        assert!(!field.touched);
        field.push_char('a');
        field.push_char('b');
        field.pop_char();
        assert_eq!(field.as_text(), "a");
        assert!(field.touched);
    }

    #[test]
    fn test_with_text_is_not_touched() {
        let field = FormField::input("name", "Name", FieldKind::Text, FieldRule::optional())
            .with_text("preset");
        assert_eq!(field.as_text(), "preset");
        assert!(!field.touched);
    }

    #[test]
    fn test_choice_defaults_and_cycles() {
        let mut field = FormField::choice("payment_status", "Payment", OPTIONS, "pending");
        assert_eq!(field.as_text(), "pending");
        field.next_option();
        assert_eq!(field.as_text(), "refunded");
        field.next_option();
        assert_eq!(field.as_text(), "paid");
        field.prev_option();
        assert_eq!(field.as_text(), "refunded");
    }

    #[test]
    fn test_choice_ignores_typed_characters() {
        let mut field = FormField::choice("payment_status", "Payment", OPTIONS, "paid");
        field.push_char('x');
        field.pop_char();
        assert_eq!(field.as_text(), "paid");
        assert!(!field.touched);
    }

    #[test]
    fn test_choice_set_text_selects_option() {
        let mut field = FormField::choice("payment_status", "Payment", OPTIONS, "paid");
        field.set_text("Refunded".to_string());
        assert_eq!(field.as_text(), "refunded");
    }

    #[test]
    fn test_unmatched_choice_needs_a_pick() {
        let mut field = FormField::choice("payment_status", "Payment", OPTIONS, "paid");
        field.set_text("unknown".to_string());
        assert!(field.is_blank());
        assert_eq!(field.as_text(), "");
        assert_eq!(field.display_value(), "◂ unknown ▸");

        field.next_option();
        assert_eq!(field.as_text(), "paid");

        field.set_text("bogus".to_string());
        field.prev_option();
        assert_eq!(field.as_text(), "refunded");
    }

    #[test]
    fn test_id_list_splits_and_trims() {
        let field =
            FormField::input("products", "Products", FieldKind::IdList, FieldRule::optional())
                .with_text(" 4, 9 ,, 12 ");
        assert_eq!(field.as_id_list(), vec!["4", "9", "12"]);
    }

    #[test]
    fn test_is_blank() {
        let field =
            FormField::input("a", "A", FieldKind::Text, FieldRule::optional()).with_text("   ");
        assert!(field.is_blank());
        let choice = FormField::choice("b", "B", OPTIONS, "paid");
        assert!(!choice.is_blank());
    }
}
