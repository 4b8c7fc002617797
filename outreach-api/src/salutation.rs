use shared_types::{Formality, Language};

/// Which artifact the greeting opens. French distinguishes the letter opening
/// ("Cher M. …") from the email opening ("Bonjour M. …"); English uses
/// "Dear …" for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Letter,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salutation {
    pub greeting: String,
    /// Closing phrase, present only where the artifact's template does not
    /// own its closing (English cover letters).
    pub signature: Option<String>,
}

/// Pure greeting/signature selection. Missing name data degrades to the
/// impersonal greeting for the language; this never fails.
pub fn resolve(
    language: Language,
    channel: Channel,
    formality: Formality,
    title: &str,
    first_name: &str,
    last_name: &str,
) -> Salutation {
    let title = title.trim();
    let first_name = first_name.trim();
    let last_name = last_name.trim();

    let formal = formality == Formality::Formal && !title.is_empty() && !last_name.is_empty();
    let semi_formal = formality == Formality::SemiFormal && !first_name.is_empty();

    match language {
        Language::English => {
            let greeting = if formal {
                format!("Dear {title} {last_name}")
            } else if semi_formal {
                format!("Dear {first_name}")
            } else {
                "Dear Sir or Madam".to_string()
            };

            // Signature only accompanies the cover letter; the email template
            // carries its own closing.
            let signature = match channel {
                Channel::Letter if formal || semi_formal => Some("Yours sincerely".to_string()),
                Channel::Letter => Some("Yours faithfully".to_string()),
                Channel::Email => None,
            };

            Salutation { greeting, signature }
        }
        Language::French => {
            let greeting = if formal {
                match channel {
                    Channel::Letter => match title {
                        "Mr." => format!("Cher M. {last_name}"),
                        "Ms." => format!("Chère Mme. {last_name}"),
                        _ => format!("Cher {last_name}"),
                    },
                    Channel::Email => match title {
                        "Mr." => format!("Bonjour M. {last_name}"),
                        "Ms." => format!("Bonjour Mme. {last_name}"),
                        _ => format!("Bonjour {last_name}"),
                    },
                }
            } else if semi_formal {
                match channel {
                    Channel::Letter if title == "Ms." => format!("Chère {first_name}"),
                    Channel::Letter => format!("Cher {first_name}"),
                    Channel::Email => format!("Bonjour {first_name}"),
                }
            } else {
                "Madame, Monsieur".to_string()
            };

            // French templates own their closing formula.
            Salutation {
                greeting,
                signature: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formal_english_uses_title_and_last_name() {
        let s = resolve(
            Language::English,
            Channel::Letter,
            Formality::Formal,
            "Mr.",
            "Jean",
            "Dupont",
        );
        assert_eq!(s.greeting, "Dear Mr. Dupont");
        assert_eq!(s.signature.as_deref(), Some("Yours sincerely"));
        assert!(!s.greeting.contains("Sir or Madam"));
    }

    #[test]
    fn test_formal_french_honorific_mapping() {
        let letter = resolve(
            Language::French,
            Channel::Letter,
            Formality::Formal,
            "Mr.",
            "",
            "Dupont",
        );
        assert_eq!(letter.greeting, "Cher M. Dupont");
        assert_eq!(letter.signature, None);

        let letter = resolve(
            Language::French,
            Channel::Letter,
            Formality::Formal,
            "Ms.",
            "",
            "Durand",
        );
        assert_eq!(letter.greeting, "Chère Mme. Durand");

        // Unknown honorific addresses by last name alone.
        let letter = resolve(
            Language::French,
            Channel::Letter,
            Formality::Formal,
            "Dr.",
            "",
            "Durand",
        );
        assert_eq!(letter.greeting, "Cher Durand");
    }

    #[test]
    fn test_french_email_opens_with_bonjour() {
        let email = resolve(
            Language::French,
            Channel::Email,
            Formality::Formal,
            "Mr.",
            "",
            "Dupont",
        );
        assert_eq!(email.greeting, "Bonjour M. Dupont");
        assert_eq!(email.signature, None);

        let email = resolve(
            Language::French,
            Channel::Email,
            Formality::SemiFormal,
            "Ms.",
            "Marie",
            "",
        );
        assert_eq!(email.greeting, "Bonjour Marie");
    }

    #[test]
    fn test_semi_formal_uses_first_name() {
        let s = resolve(
            Language::English,
            Channel::Letter,
            Formality::SemiFormal,
            "",
            "Jean",
            "",
        );
        assert_eq!(s.greeting, "Dear Jean");
        assert_eq!(s.signature.as_deref(), Some("Yours sincerely"));

        let s = resolve(
            Language::French,
            Channel::Letter,
            Formality::SemiFormal,
            "Ms.",
            "Marie",
            "",
        );
        assert_eq!(s.greeting, "Chère Marie");
    }

    #[test]
    fn test_missing_fields_fall_back_to_impersonal() {
        // Semi-formal without a first name must not crash or half-greet.
        let s = resolve(
            Language::English,
            Channel::Letter,
            Formality::SemiFormal,
            "",
            "",
            "Dupont",
        );
        assert_eq!(s.greeting, "Dear Sir or Madam");
        assert_eq!(s.signature.as_deref(), Some("Yours faithfully"));

        // Formal without a title degrades the same way.
        let s = resolve(
            Language::French,
            Channel::Letter,
            Formality::Formal,
            "",
            "",
            "Dupont",
        );
        assert_eq!(s.greeting, "Madame, Monsieur");

        let s = resolve(
            Language::French,
            Channel::Email,
            Formality::Informal,
            "",
            "",
            "",
        );
        assert_eq!(s.greeting, "Madame, Monsieur");
    }

    #[test]
    fn test_resolver_is_deterministic() {
        let a = resolve(
            Language::English,
            Channel::Email,
            Formality::Formal,
            "Ms.",
            "Anne",
            "Smith",
        );
        let b = resolve(
            Language::English,
            Channel::Email,
            Formality::Formal,
            "Ms.",
            "Anne",
            "Smith",
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_whitespace_only_fields_count_as_empty() {
        let s = resolve(
            Language::English,
            Channel::Letter,
            Formality::Formal,
            "  ",
            "",
            "Dupont",
        );
        assert_eq!(s.greeting, "Dear Sir or Madam");
    }
}
