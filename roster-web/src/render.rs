//! HTML pages.
//!
//! Every page is a plain server-rendered document. Each user action is an
//! ordinary form post back to the page's own route, so no script runs in the
//! browser.

use crate::screens::{FormMode, LoginScreen, NoticeKind, StudentForm, StudentsScreen};
use crate::shell::{LOGOUT_PATH, Route, sidebar_links};
use roster_gateway::Session;
use roster_model::{Field, StudentRecord};
use std::fmt::Write;

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; }
.login { display: flex; justify-content: center; align-items: center; height: 100vh;
  background: linear-gradient(180deg, #6a11cb, #2575fc); }
.card { background: #fff; padding: 40px; border-radius: 16px; max-width: 400px; width: 100%;
  box-sizing: border-box; box-shadow: 0 10px 30px rgba(0,0,0,0.1); }
.card h2 { text-align: center; color: #333; }
.card label { display: block; margin-bottom: 20px; color: #555; }
input { width: 100%; padding: 10px; border: 1px solid #ccc; border-radius: 8px; box-sizing: border-box; }
input[readonly] { background: #f5f5f5; }
.primary { width: 100%; padding: 12px; background: #2575fc; color: #fff; border: none;
  border-radius: 8px; font-weight: bold; cursor: pointer; }
.sidebar { position: fixed; top: 0; left: 0; width: 250px; height: 100%; background: #F5DEB3;
  display: flex; flex-direction: column; justify-content: space-between; padding: 20px; box-sizing: border-box; }
.sidebar-button { display: block; width: 100%; padding: 10px; background: #ff7e5f; color: #fff; border: none;
  border-radius: 8px; font-weight: bold; text-align: center; text-decoration: none; cursor: pointer; }
.sidebar-button.active { background: #ff6347; }
.content { margin-left: 250px; padding: 16px; }
.panel { background: #F5DEB3; border-radius: 16px; padding: 20px; min-height: calc(100vh - 80px); }
.header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 24px; }
.add { padding: 10px 20px; background: linear-gradient(90deg, #ff7e5f, #feb47b); color: #fff; border: none;
  border-radius: 8px; font-weight: bold; cursor: pointer; }
.notice { padding: 10px; border-radius: 4px; margin-bottom: 20px; color: #fff; }
.notice.success { background: #4CAF50; }
.notice.error { background: #d9534f; }
table { width: 100%; border-collapse: collapse; }
thead tr { background: #ff7e5f; color: #fff; text-align: left; }
th, td { padding: 12px 16px; }
tbody tr { background: #fff; border-bottom: 1px solid #ddd; }
.actions { display: flex; gap: 8px; }
.actions button { background: none; border: none; color: #ff7e5f; cursor: pointer; }
.overlay { position: fixed; inset: 0; background: rgba(0,0,0,0.5); display: flex;
  justify-content: center; align-items: center; padding: 16px; }
.modal { background: #fff; padding: 24px; border-radius: 12px; width: 100%; max-width: 600px;
  max-height: 90vh; overflow-y: auto; box-sizing: border-box; }
.modal-header { display: flex; justify-content: space-between; align-items: center; }
.close { background: transparent; border: none; font-size: 18px; color: #007bff; cursor: pointer; }
.field-error { color: red; font-size: 12px; margin: 4px 0 0; }
.modal form.fields { display: flex; flex-direction: column; gap: 10px; }
"#;

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn document(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} · Roster</title>\n{head_extra}<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

pub fn login_page(screen: &LoginScreen) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"login\"><div class=\"card\">\n<h2>Welcome Back</h2>\n");
    if let Some(error) = screen.error {
        let _ = writeln!(body, "<p class=\"field-error\" role=\"alert\">{}</p>", escape(error));
    }
    let _ = write!(
        body,
        "<form method=\"post\" action=\"{action}\">\n\
         <label for=\"email\">Email\n\
         <input id=\"email\" name=\"email\" type=\"email\" placeholder=\"Enter your email\" value=\"{email}\" required></label>\n\
         <label for=\"password\">Password\n\
         <input id=\"password\" name=\"password\" type=\"password\" placeholder=\"Enter your password\" required></label>\n\
         <button class=\"primary\" type=\"submit\">Login</button>\n\
         </form>\n</div></div>",
        action = Route::Login.path(),
        email = escape(&screen.email),
    );
    document(Route::Login.title(), "", &body)
}

pub fn students_page(screen: &StudentsScreen, session: &Session) -> String {
    let mut body = String::new();
    sidebar(&mut body, Route::Students, session);

    body.push_str("<main class=\"content\"><div class=\"panel\">\n<div class=\"header\">\n<h1>Students List</h1>\n");
    action_form(&mut body, "create", None, "add", "Add Student");
    body.push_str("</div>\n");

    if let Some(notice) = screen.notice() {
        let kind = match notice.kind {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        };
        let _ = writeln!(
            body,
            "<div class=\"notice {kind}\" role=\"status\">{}</div>",
            escape(notice.text)
        );
    }

    students_table(&mut body, screen.students());

    if screen.form().is_open() {
        modal(&mut body, screen.form());
    }
    body.push_str("</div></main>");

    // Re-render once the notice has expired, unless the user is mid-edit.
    let refresh = match screen.notice() {
        Some(notice) if !screen.is_modal_open() => format!(
            "<meta http-equiv=\"refresh\" content=\"{};url={}\">\n",
            notice.remaining().as_secs() + 1,
            Route::Students.path()
        ),
        _ => String::new(),
    };
    document(Route::Students.title(), &refresh, &body)
}

fn sidebar(out: &mut String, current: Route, session: &Session) {
    out.push_str("<nav class=\"sidebar\">\n<div>\n");
    for link in sidebar_links(current) {
        let class = if link.active { "sidebar-button active" } else { "sidebar-button" };
        let _ = writeln!(
            out,
            "<a class=\"{class}\" href=\"{}\">{}</a>",
            link.route.path(),
            escape(link.label)
        );
    }
    let _ = write!(
        out,
        "</div>\n<div>\n<p>{}</p>\n<form method=\"post\" action=\"{LOGOUT_PATH}\">\
         <button class=\"sidebar-button\" type=\"submit\">Logout</button></form>\n</div>\n</nav>\n",
        escape(&session.email)
    );
}

fn action_form(out: &mut String, action: &str, id: Option<&str>, class: &str, label: &str) {
    let _ = write!(
        out,
        "<form method=\"post\" action=\"{}\"><input type=\"hidden\" name=\"action\" value=\"{action}\">",
        Route::Students.path()
    );
    if let Some(id) = id {
        let _ = write!(out, "<input type=\"hidden\" name=\"id\" value=\"{}\">", escape(id));
    }
    let _ = writeln!(out, "<button class=\"{class}\" type=\"submit\">{label}</button></form>");
}

fn students_table(out: &mut String, students: &[StudentRecord]) {
    out.push_str(
        "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Class</th><th>Section</th>\
         <th>Roll Number</th><th>Action</th></tr></thead>\n<tbody>\n",
    );
    for student in students {
        let id = student.id.as_ref().map(|id| id.as_str()).unwrap_or_default();
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"actions\">",
            escape(id),
            escape(&student.name),
            escape(&student.class_name),
            escape(&student.section),
            escape(&student.roll_number),
        );
        action_form(out, "view", Some(id), "view", "View");
        action_form(out, "edit", Some(id), "edit", "Edit");
        action_form(out, "delete", Some(id), "delete", "Delete");
        out.push_str("</td></tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

fn modal(out: &mut String, form: &StudentForm) {
    let (Some(mode), Some(draft)) = (form.mode(), form.draft()) else {
        return;
    };
    let errors = form.errors();

    let _ = write!(
        out,
        "<div class=\"overlay\"><div class=\"modal\" role=\"dialog\">\n<div class=\"modal-header\">\n<h2>{}</h2>\n",
        mode.title()
    );
    action_form(out, "cancel", None, "close", "×");
    out.push_str("</div>\n");

    let _ = writeln!(
        out,
        "<form class=\"fields\" method=\"post\" action=\"{}\">\n<input type=\"hidden\" name=\"action\" value=\"submit\">",
        Route::Students.path()
    );
    let readonly = if mode.is_read_only() { " readonly" } else { "" };
    for field in Field::ALL {
        let _ = write!(
            out,
            "<div><input name=\"{key}\" type=\"{kind}\" placeholder=\"{label}\" aria-label=\"{label}\" value=\"{value}\"{readonly}>",
            key = field.key(),
            kind = field.spec().kind.html_type(),
            label = field.label(),
            value = escape(draft.get(field)),
        );
        if let Some(message) = errors.and_then(|e| e.get(field)) {
            let _ = write!(out, "<p class=\"field-error\">{}</p>", escape(message));
        }
        out.push_str("</div>\n");
    }
    if mode != FormMode::View {
        let _ = writeln!(
            out,
            "<button class=\"primary\" type=\"submit\">{}</button>",
            mode.submit_label()
        );
    }
    out.push_str("</form>\n</div></div>\n");
}
