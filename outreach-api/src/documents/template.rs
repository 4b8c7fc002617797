use std::collections::HashMap;

/// Substitute `{{ key }}` placeholders from the context map. Placeholder
/// names are trimmed, so `{{name}}` and `{{ name }}` are equivalent. Unknown
/// placeholders are re-emitted untouched; values are inserted literally.
pub fn fill(template: &str, context: &HashMap<String, String>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '{' && chars.peek() == Some(&'{') {
            chars.next(); // consume second {

            let mut var_name = String::new();
            let mut closed = false;
            while let Some(ch) = chars.next() {
                if ch == '}' && chars.peek() == Some(&'}') {
                    chars.next();
                    closed = true;
                    break;
                }
                var_name.push(ch);
            }

            if !closed {
                // Unterminated placeholder at end of input; emit as-is.
                result.push_str("{{");
                result.push_str(&var_name);
                continue;
            }

            match context.get(var_name.trim()) {
                Some(value) => result.push_str(value),
                None => {
                    result.push_str("{{");
                    result.push_str(&var_name);
                    result.push_str("}}");
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fill_substitutes_known_placeholders() {
        let ctx = context(&[("name", "Dear Mr. Dupont"), ("job", "Trader")]);
        assert_eq!(
            fill("{{ name }}, re: {{ job }}", &ctx),
            "Dear Mr. Dupont, re: Trader"
        );
    }

    #[test]
    fn test_fill_ignores_spacing_inside_braces() {
        let ctx = context(&[("name", "Anne")]);
        assert_eq!(fill("{{name}} {{ name }}", &ctx), "Anne Anne");
    }

    #[test]
    fn test_unknown_placeholders_left_as_is() {
        let ctx = context(&[("name", "Anne")]);
        assert_eq!(fill("{{ name }} {{ missing }}", &ctx), "Anne {{ missing }}");
    }

    #[test]
    fn test_unterminated_placeholder_is_emitted_verbatim() {
        let ctx = context(&[]);
        assert_eq!(fill("tail {{ open", &ctx), "tail {{ open");
    }

    #[test]
    fn test_values_are_inserted_literally() {
        // A value containing braces must not be re-expanded.
        let ctx = context(&[("a", "{{ b }}"), ("b", "nope")]);
        assert_eq!(fill("{{ a }}", &ctx), "{{ b }}");
    }
}
