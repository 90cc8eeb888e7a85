//! Server-rendered HTML pages.

use faqdesk_core::types::Section;

use crate::session::Flash;

const LAYOUT: &str = include_str!("templates/layout.html");
const CHAT_BODY: &str = include_str!("templates/chat.html");

/// Escape text for HTML element and attribute context.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, flash: Option<&Flash>, admin: bool, body: &str) -> String {
    let nav = if admin {
        r#"<a href="/admin">Admin</a> <a href="/logout">Log out</a>"#
    } else {
        r#"<a href="/login">Admin login</a>"#
    };
    let flash = flash
        .map(|f| {
            format!(
                r#"<div class="flash {}">{}</div>"#,
                f.category.as_str(),
                escape_html(&f.message)
            )
        })
        .unwrap_or_default();
    // Body last: it is the only part carrying stored user text
    LAYOUT
        .replace("{{title}}", &escape_html(title))
        .replace("{{nav}}", nav)
        .replace("{{flash}}", &flash)
        .replace("{{body}}", body)
}

pub fn chat_page(flash: Option<&Flash>, admin: bool) -> String {
    layout("Ask a question", flash, admin, CHAT_BODY)
}

pub fn login_page(error: Option<&str>, flash: Option<&Flash>) -> String {
    let error = error
        .map(|e| format!(r#"<div class="flash error">{}</div>"#, escape_html(e)))
        .unwrap_or_default();
    let body = format!(
        r#"<div class="card">
  <h2>Admin login</h2>
  {error}
  <form method="post" action="/login">
    <label>Password <input type="password" name="password" required autofocus></label>
    <button type="submit">Log in</button>
  </form>
</div>"#
    );
    layout("Admin login", flash, false, &body)
}

pub fn admin_page(sections: &[Section], flash: Option<&Flash>) -> String {
    let mut body = String::new();
    let options: String = sections
        .iter()
        .map(|s| format!(r#"<option value="{}">"#, escape_html(&s.name)))
        .collect();
    body.push_str(&format!(
        r#"<div class="card">
  <h2>Add a FAQ</h2>
  <form method="post" action="/admin/add">
    <label>Section <input name="section" list="section-names" required></label>
    <datalist id="section-names">{options}</datalist>
    <label>Question <input name="question" required></label>
    <label>Answer <textarea name="answer" rows="3" required></textarea></label>
    <button type="submit">Add</button>
  </form>
</div>"#
    ));

    if sections.is_empty() {
        body.push_str(r#"<p class="muted">No FAQs yet.</p>"#);
    }
    for (position, section) in sections.iter().enumerate() {
        body.push_str(&format!(
            r#"<div class="card"><h3>{}</h3>"#,
            escape_html(&section.name)
        ));
        // Index routes resolve a name to its first section only
        let first_of_name = sections.iter().position(|s| s.name == section.name) == Some(position);
        for (index, entry) in section.entries.iter().enumerate() {
            let (edit, delete) = if entry.has_id() {
                let id = urlencoding::encode(&entry.id);
                (
                    format!("/admin/entries/{id}/edit"),
                    format!("/admin/entries/{id}/delete"),
                )
            } else if first_of_name {
                let name = urlencoding::encode(&section.name);
                (
                    format!("/admin/edit/{name}/{index}"),
                    format!("/admin/delete/{name}/{index}"),
                )
            } else {
                body.push_str(&format!(
                    r#"<div class="faq"><strong>{}</strong><p>{}</p><p class="muted">Read-only: rename this section to edit it here.</p></div>"#,
                    escape_html(&entry.question),
                    escape_html(&entry.answer)
                ));
                continue;
            };
            body.push_str(&format!(
                r#"<div class="faq">
  <form method="post" action="{}">
    <input name="question" value="{}" required>
    <textarea name="answer" rows="2" required>{}</textarea>
    <button type="submit">Save</button>
  </form>
  <form method="post" action="{}">
    <button type="submit" class="danger">Delete</button>
  </form>
</div>"#,
                escape_html(&edit),
                escape_html(&entry.question),
                escape_html(&entry.answer),
                escape_html(&delete)
            ));
        }
        if section.entries.is_empty() {
            body.push_str(r#"<p class="muted">Empty section.</p>"#);
        }
        body.push_str("</div>");
    }
    layout("Admin", flash, true, &body)
}

pub fn questions_page(sections: &[Section], flash: Option<&Flash>, admin: bool) -> String {
    let mut body = String::from(r#"<h2>Frequently asked questions</h2>"#);
    if sections.is_empty() {
        body.push_str(r#"<p class="muted">No questions have been published yet.</p>"#);
    }
    for section in sections {
        body.push_str(&format!(
            r#"<div class="card"><h3>{}</h3>"#,
            escape_html(&section.name)
        ));
        for entry in &section.entries {
            body.push_str(&format!(
                r#"<div class="faq"><strong>{}</strong><p>{}</p></div>"#,
                escape_html(&entry.question),
                escape_html(&entry.answer)
            ));
        }
        body.push_str("</div>");
    }
    layout("Questions", flash, admin, &body)
}

pub fn contact_page(flash: Option<&Flash>, admin: bool) -> String {
    let body = r#"<div class="card">
  <h2>Contact us</h2>
  <form method="post" action="/contact">
    <label>Name <input name="name" required></label>
    <label>Email <input type="email" name="email" required></label>
    <label>Message <textarea name="message" rows="4" required></textarea></label>
    <button type="submit">Send</button>
  </form>
</div>"#;
    layout("Contact", flash, admin, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqdesk_core::types::Entry;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b a="1">Tom & 'Jerry'</b>"#),
            "&lt;b a=&quot;1&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_admin_page_escapes_and_links_ids() {
        let mut section = Section::new("Cards <script>");
        section.entries.push(Entry {
            id: "abc-123".into(),
            question: "q <i>".into(),
            answer: "a & b".into(),
        });
        let html = admin_page(&[section], None);
        assert!(html.contains("Cards &lt;script&gt;"));
        assert!(html.contains("q &lt;i&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("/admin/entries/abc-123/edit"));
        assert!(html.contains("/admin/entries/abc-123/delete"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_admin_page_links_entries_without_ids_by_index() {
        let legacy = |q: &str| Entry {
            id: String::new(),
            question: q.into(),
            answer: "a".into(),
        };
        let mut first = Section::new("ID & Cards");
        first.entries.push(legacy("q0"));
        first.entries.push(legacy("q1"));
        let mut dup = Section::new("ID & Cards");
        dup.entries.push(legacy("dup"));

        let html = admin_page(&[first, dup], None);
        assert!(html.contains("/admin/edit/ID%20%26%20Cards/1"));
        assert!(html.contains("/admin/delete/ID%20%26%20Cards/0"));
        assert!(!html.contains("/admin/entries/"));
        assert!(html.contains("Read-only"));
    }

    #[test]
    fn test_flash_rendered_once_in_layout() {
        let html = contact_page(Some(&Flash::success("Thanks!")), false);
        assert!(html.contains(r#"<div class="flash success">Thanks!</div>"#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_login_page_shows_error() {
        let html = login_page(Some("Incorrect password. Try again."), None);
        assert!(html.contains("Incorrect password. Try again."));
        assert!(html.contains(r#"action="/login""#));
    }
}
