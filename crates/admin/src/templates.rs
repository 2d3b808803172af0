//! Server-rendered HTML for the admin panel
//!
//! Small string-building template functions. Everything user-supplied goes
//! through [`escape`].

use trackquiz_core::models::{Broadcast, Track};

/// Minimal HTML escaping for text and attribute values.
pub fn escape(s: &str) -> String {
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

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} — trackquiz admin</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2rem auto; max-width: 60rem; padding: 0 1rem; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 0.4rem; text-align: left; }}\n\
         .error {{ color: #b00; }}\n\
         .flash {{ color: #070; }}\n\
         .inactive {{ color: #888; }}\n\
         nav a {{ margin-right: 1rem; }}\n\
         input[type=text], textarea {{ width: 12rem; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <nav><a href=\"/admin\">Tracks</a><a href=\"/admin/broadcasts\">Broadcasts</a>\
         <a href=\"/admin/backup\">Backup</a><a href=\"/admin/logout\">Logout</a></nav>\n\
         <h1>{title}</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        body = body,
    )
}

pub fn login_page(error: Option<&str>) -> String {
    let error_html = error
        .map(|e| format!("<p class=\"error\">{}</p>", escape(e)))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\"><head><meta charset=\"utf-8\"><title>Login — trackquiz admin</title></head>\n\
         <body style=\"font-family: sans-serif; margin: 4rem auto; max-width: 20rem;\">\n\
         <h1>Admin login</h1>\n\
         {error_html}\n\
         <form method=\"post\" action=\"/admin/login\">\n\
         <input type=\"password\" name=\"password\" placeholder=\"Password\" autofocus>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         </body></html>\n"
    )
}

pub fn tracks_page(tracks: &[Track], flash: Option<&str>, error: Option<&str>) -> String {
    let mut body = String::new();

    if let Some(flash) = flash {
        body.push_str(&format!("<p class=\"flash\">{}</p>\n", escape(flash)));
    }
    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }

    body.push_str(
        "<h2>Add track</h2>\n\
         <form method=\"post\" action=\"/admin/tracks\">\n\
         <input type=\"text\" name=\"artist\" placeholder=\"Artist\">\n\
         <input type=\"text\" name=\"title\" placeholder=\"Title\">\n\
         <input type=\"number\" name=\"points\" value=\"1\" min=\"0\">\n\
         <input type=\"text\" name=\"hint\" placeholder=\"Hint (optional)\">\n\
         <button type=\"submit\">Add</button>\n\
         </form>\n\
         <h2>Tracks</h2>\n",
    );

    if tracks.is_empty() {
        body.push_str("<p>No tracks yet.</p>\n");
        return page("Tracks", &body);
    }

    body.push_str(
        "<table>\n<tr><th>ID</th><th>Artist</th><th>Title</th><th>Points</th>\
         <th>Hint</th><th>Active</th><th></th></tr>\n",
    );

    for track in tracks {
        let row_class = if track.is_active { "" } else { " class=\"inactive\"" };
        let checked = if track.is_active { " checked" } else { "" };
        body.push_str(&format!(
            "<tr{row_class}><td>{id}</td>\n\
             <td colspan=\"5\">\n\
             <form method=\"post\" action=\"/admin/tracks/{id}/edit\">\n\
             <input type=\"text\" name=\"artist\" value=\"{artist}\">\n\
             <input type=\"text\" name=\"title\" value=\"{title}\">\n\
             <input type=\"number\" name=\"points\" value=\"{points}\" min=\"0\">\n\
             <input type=\"text\" name=\"hint\" value=\"{hint}\">\n\
             <label><input type=\"checkbox\" name=\"is_active\" value=\"on\"{checked}> active</label>\n\
             <button type=\"submit\">Save</button>\n\
             </form>\n\
             </td>\n\
             <td>\n\
             <form method=\"post\" action=\"/admin/tracks/{id}/deactivate\">\
             <button type=\"submit\">Deactivate</button></form>\n\
             <form method=\"post\" action=\"/admin/tracks/{id}/delete\">\
             <button type=\"submit\">Delete</button></form>\n\
             </td></tr>\n",
            id = track.id,
            artist = escape(&track.artist),
            title = escape(&track.title),
            points = track.points,
            hint = escape(track.hint.as_deref().unwrap_or("")),
        ));
    }

    body.push_str("</table>\n");

    page("Tracks", &body)
}

pub fn broadcasts_page(broadcasts: &[Broadcast], status: Option<(u64, u64)>) -> String {
    let mut body = String::new();

    if let Some((sent, failed)) = status {
        body.push_str(&format!(
            "<p class=\"flash\">Broadcast delivered: {sent} sent, {failed} failed.</p>\n"
        ));
    }

    body.push_str("<p><a href=\"/admin/broadcasts/new\">New broadcast</a></p>\n");

    if broadcasts.is_empty() {
        body.push_str("<p>No broadcasts yet.</p>\n");
        return page("Broadcasts", &body);
    }

    body.push_str("<table>\n<tr><th>ID</th><th>Text</th><th>Created</th><th>Sent</th></tr>\n");
    for b in broadcasts {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            b.id,
            escape(&b.body),
            b.created_at.format("%Y-%m-%d %H:%M"),
            b.sent_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "—".to_string()),
        ));
    }
    body.push_str("</table>\n");

    page("Broadcasts", &body)
}

pub fn broadcast_new_page(error: Option<&str>) -> String {
    let error_html = error
        .map(|e| format!("<p class=\"error\">{}</p>\n", escape(e)))
        .unwrap_or_default();

    let body = format!(
        "{error_html}\
         <form method=\"post\" action=\"/admin/broadcasts\">\n\
         <textarea name=\"body\" rows=\"6\" cols=\"50\" placeholder=\"Message text\"></textarea><br>\n\
         <button type=\"submit\">Send to all users</button>\n\
         </form>\n"
    );

    page("New broadcast", &body)
}

pub fn backup_page(restore_status: Option<&str>) -> String {
    let status_html = match restore_status {
        Some("ok") => "<p class=\"flash\">Database restored.</p>\n".to_string(),
        Some("missing") => {
            "<p class=\"error\">No file uploaded or confirmation missing.</p>\n".to_string()
        }
        Some("failed") => {
            "<p class=\"error\">Restore failed, the uploaded file is not a valid database. \
             The current data is unchanged.</p>\n"
                .to_string()
        }
        _ => String::new(),
    };

    let body = format!(
        "{status_html}\
         <h2>Backup</h2>\n\
         <p><a href=\"/admin/backup/download\">Download database file</a></p>\n\
         <h2>Restore</h2>\n\
         <p class=\"error\">Restoring replaces the live database. This cannot be undone.</p>\n\
         <form method=\"post\" action=\"/admin/restore\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"database\">\n\
         <label><input type=\"checkbox\" name=\"confirm\" value=\"yes\"> I understand</label>\n\
         <button type=\"submit\">Restore</button>\n\
         </form>\n"
    );

    page("Backup & restore", &body)
}

pub fn error_page(status: u16, message: &str) -> String {
    page(
        &format!("Error {status}"),
        &format!("<p class=\"error\">{}</p>\n", escape(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<b>\"A & B\"</b>'"),
            "&lt;b&gt;&quot;A &amp; B&quot;&lt;/b&gt;&#39;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_tracks_page_escapes_values() {
        let track = Track {
            id: 1,
            artist: "X<script>".to_string(),
            title: "Y\"Z".to_string(),
            points: 1,
            hint: None,
            is_active: true,
            created_at: Utc::now(),
        };

        let html = tracks_page(&[track], None, None);
        assert!(!html.contains("X<script>"));
        assert!(html.contains("X&lt;script&gt;"));
        assert!(html.contains("Y&quot;Z"));
    }

    #[test]
    fn test_login_page_shows_error() {
        let html = login_page(Some("Wrong password"));
        assert!(html.contains("Wrong password"));
        assert!(login_page(None).contains("Admin login"));
    }

    #[test]
    fn test_backup_page_restore_banners() {
        assert!(backup_page(Some("ok")).contains("Database restored"));
        assert!(backup_page(Some("missing")).contains("confirmation missing"));
        assert!(backup_page(Some("failed")).contains("data is unchanged"));
        assert!(!backup_page(None).contains("class=\"flash\""));
    }

    #[test]
    fn test_broadcasts_page_with_status() {
        let html = broadcasts_page(&[], Some((3, 1)));
        assert!(html.contains("3 sent, 1 failed"));
        assert!(html.contains("No broadcasts yet"));
    }
}
