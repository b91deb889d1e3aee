use crate::domain::model::{Contact, PhonebookName, RenderedPhonebook};
use std::borrow::Cow;

pub const PHONEBOOK_NAME_PLACEHOLDER: &str = "{phonebook-name}";
pub const CONTACTS_PLACEHOLDER: &str = "{contacts-will-be-placed-here}";
pub const REAL_NAME_PLACEHOLDER: &str = "{real-name}";
pub const HOME_NUMBER_PLACEHOLDER: &str = "{home-phone-number}";
pub const MOBILE_NUMBER_PLACEHOLDER: &str = "{mobile-phone-number}";

// XML 宣告必須在第一行，否則匯入會失敗
const BASE_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<phonebooks>
    <phonebook owner="1" name="{phonebook-name}">
        {contacts-will-be-placed-here}
    </phonebook>
</phonebooks>
"#;

const CONTACT_TEMPLATE: &str = r#"
        <contact>
            <category>0</category>
            <person>
                <realName>{real-name}</realName>
            </person>
            <telephony nid="3">
                <number type="home" vanity="" prio="1" id="0">{home-phone-number}</number>
                <number type="mobile" vanity="" prio="0" id="1">{mobile-phone-number}</number>
                <number type="work" vanity="" prio="" id="2"></number>
            </telephony>
            <services />
            <setup />
            <uniqueid></uniqueid>
        </contact>
        "#;

/// Phonebook envelope with `{phonebook-name}` and `{contacts-will-be-placed-here}`.
pub fn base() -> &'static str {
    BASE_TEMPLATE
}

/// A single `<contact>` element with name, home and mobile placeholders.
/// The work number slot is always empty.
pub fn contact() -> &'static str {
    CONTACT_TEMPLATE
}

/// Replaces `&`, `<`, `>`, `"` and `'` with their entities.
pub fn escape_xml(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Literal placeholder substitution into the phonebook templates.
///
/// Substitution is plain text replacement applied in a fixed order, so a
/// value that itself contains a later placeholder gets that placeholder
/// replaced too. Escaping is off by default; values then land in the
/// document exactly as read.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer {
    escape: bool,
}

impl TemplateRenderer {
    pub fn new(escape: bool) -> Self {
        Self { escape }
    }

    fn value<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        if self.escape {
            escape_xml(raw)
        } else {
            Cow::Borrowed(raw)
        }
    }

    pub fn render_contact(&self, template: &str, contact: &Contact) -> String {
        template
            .replace(REAL_NAME_PLACEHOLDER, &self.value(&contact.real_name))
            .replace(HOME_NUMBER_PLACEHOLDER, &self.value(&contact.home_number))
            .replace(MOBILE_NUMBER_PLACEHOLDER, &self.value(&contact.mobile_number))
    }

    /// Renders each contact independently and joins them without separator.
    pub fn render_contacts(&self, template: &str, contacts: &[Contact]) -> String {
        contacts
            .iter()
            .map(|c| self.render_contact(template, c))
            .collect::<Vec<_>>()
            .concat()
    }

    pub fn build_phonebook(
        &self,
        name: &PhonebookName,
        phonebook_template: &str,
        contacts_block: &str,
    ) -> String {
        phonebook_template
            .replace(PHONEBOOK_NAME_PLACEHOLDER, &self.value(name.as_str()))
            .replace(CONTACTS_PLACEHOLDER, contacts_block)
    }

    pub fn render(&self, name: &PhonebookName, contacts: &[Contact]) -> RenderedPhonebook {
        let block = self.render_contacts(contact(), contacts);
        RenderedPhonebook {
            contact_count: contacts.len(),
            xml: self.build_phonebook(name, base(), &block),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family() -> PhonebookName {
        PhonebookName::new("Family").unwrap()
    }

    #[test]
    fn test_render_contact_fills_all_placeholders() {
        let renderer = TemplateRenderer::default();
        let xml = renderer.render_contact(contact(), &Contact::new("Jane Doe", "12345", "67890"));

        assert!(xml.contains("<realName>Jane Doe</realName>"));
        assert!(xml.contains(r#"<number type="home" vanity="" prio="1" id="0">12345</number>"#));
        assert!(xml.contains(r#"<number type="mobile" vanity="" prio="0" id="1">67890</number>"#));
        assert!(xml.contains(r#"<number type="work" vanity="" prio="" id="2"></number>"#));
        assert!(!xml.contains(REAL_NAME_PLACEHOLDER));
        assert!(!xml.contains(HOME_NUMBER_PLACEHOLDER));
        assert!(!xml.contains(MOBILE_NUMBER_PLACEHOLDER));
    }

    #[test]
    fn test_build_phonebook_envelope() {
        let renderer = TemplateRenderer::default();
        let xml = renderer.build_phonebook(&family(), base(), "<contact/>");

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n"));
        assert!(xml.contains(r#"<phonebook owner="1" name="Family">"#));
        assert!(xml.contains("<contact/>"));
        assert!(!xml.contains(PHONEBOOK_NAME_PLACEHOLDER));
        assert!(!xml.contains(CONTACTS_PLACEHOLDER));
        assert!(xml.ends_with("</phonebooks>\n"));
    }

    #[test]
    fn test_contacts_joined_in_order_without_separator() {
        let renderer = TemplateRenderer::default();
        let contacts = vec![
            Contact::new("First", "1", "2"),
            Contact::new("Second", "3", "4"),
        ];

        let block = renderer.render_contacts(contact(), &contacts);

        let expected = format!(
            "{}{}",
            renderer.render_contact(contact(), &contacts[0]),
            renderer.render_contact(contact(), &contacts[1])
        );
        assert_eq!(block, expected);
        assert!(block.find("First").unwrap() < block.find("Second").unwrap());
    }

    #[test]
    fn test_render_empty_phonebook() {
        let rendered = TemplateRenderer::default().render(&family(), &[]);

        assert_eq!(rendered.contact_count, 0);
        assert!(!rendered.xml.contains("<contact>"));
        assert!(rendered.xml.contains(r#"name="Family""#));
    }

    #[test]
    fn test_without_escaping_values_are_literal() {
        let renderer = TemplateRenderer::default();
        let xml = renderer.render_contact(contact(), &Contact::new("Tom & Jerry", "<1>", ""));

        assert!(xml.contains("<realName>Tom & Jerry</realName>"));
        assert!(xml.contains(r#"id="0"><1></number>"#));
    }

    #[test]
    fn test_escaping_when_enabled() {
        let renderer = TemplateRenderer::new(true);
        let name = PhonebookName::new(r#"Mom & "Dad""#).unwrap();
        let rendered = renderer.render(&name, &[Contact::new("Tom & Jerry", "<1>", "it's")]);

        assert!(rendered
            .xml
            .contains(r#"name="Mom &amp; &quot;Dad&quot;""#));
        assert!(rendered.xml.contains("<realName>Tom &amp; Jerry</realName>"));
        assert!(rendered.xml.contains(">&lt;1&gt;</number>"));
        assert!(rendered.xml.contains(">it&apos;s</number>"));
    }

    #[test]
    fn test_escape_xml_borrows_clean_input() {
        assert!(matches!(escape_xml("Jane Doe"), Cow::Borrowed("Jane Doe")));
        assert_eq!(escape_xml("a&b"), "a&amp;b");
    }

    #[test]
    fn test_substitution_is_sequential() {
        let renderer = TemplateRenderer::default();
        let xml = renderer.render_contact(
            contact(),
            &Contact::new(HOME_NUMBER_PLACEHOLDER, "12345", "67890"),
        );

        // 名字中的佔位字串會被後續的替換覆寫
        assert!(xml.contains("<realName>12345</realName>"));
    }
}
