//! Create / edit form page

use std::fmt::Write;

use chrono_tz::Tz;
use shared::error::FieldErrors;
use shared::models::{
    MAX_PARTY_SIZE, MIN_PARTY_SIZE, PHONE_REGEX, ReservationForm, ReservationStatus,
};
use shared::time;

use super::{escape, layout};

/// Which form is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Edit(i64),
}

impl FormTarget {
    fn title(&self) -> &'static str {
        match self {
            Self::Create => "Create Reservation",
            Self::Edit(_) => "Edit Reservation",
        }
    }

    fn action(&self) -> String {
        match self {
            Self::Create => "/reservations".to_string(),
            Self::Edit(id) => format!("/reservations/{id}"),
        }
    }

    fn submit_label(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit(_) => "Update",
        }
    }
}

/// Render the form with the given values and per-field messages
pub fn render(
    target: FormTarget,
    form: &ReservationForm,
    errors: &FieldErrors,
    tz: Tz,
) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<div class=\"header\"><h1>{}</h1><a href=\"/reservations\">Back to list</a></div>",
        target.title()
    );

    let _ = write!(
        body,
        "<form class=\"card\" style=\"padding:16px\" method=\"post\" action=\"{}\" novalidate>",
        target.action()
    );

    body.push_str("<div class=\"field\"><label for=\"customer_name\">Name</label>");
    let _ = write!(
        body,
        "<input id=\"customer_name\" type=\"text\" name=\"customer_name\" \
         maxlength=\"100\" value=\"{}\">",
        escape(&form.customer_name)
    );
    body.push_str(&error(errors, "customer_name"));
    body.push_str("</div>");

    body.push_str("<div class=\"field\"><label for=\"phone\">Phone</label>");
    let _ = write!(
        body,
        "<input id=\"phone\" type=\"tel\" name=\"phone\" placeholder=\"+84123456789\" \
         pattern=\"{}\" title=\"8 to 15 digits, optional leading +\" value=\"{}\">",
        escape(PHONE_REGEX),
        escape(&form.phone)
    );
    body.push_str(&error(errors, "phone"));
    body.push_str("</div>");

    body.push_str(
        "<div class=\"row\"><div class=\"field\">\
         <label for=\"party_size\">Party size</label>",
    );
    let _ = write!(
        body,
        "<input id=\"party_size\" type=\"number\" name=\"party_size\" \
         min=\"{MIN_PARTY_SIZE}\" max=\"{MAX_PARTY_SIZE}\" value=\"{}\">",
        escape(&form.party_size)
    );
    body.push_str(&error(errors, "party_size"));
    body.push_str("</div>");

    body.push_str("<div class=\"field\"><label for=\"reserved_at\">Reserved at</label>");
    let _ = write!(
        body,
        "<input id=\"reserved_at\" type=\"datetime-local\" name=\"reserved_at\" value=\"{}\">",
        escape(&time::to_input_datetime(&form.reserved_at, tz))
    );
    body.push_str(&error(errors, "reserved_at"));
    body.push_str("</div></div>");

    body.push_str(
        "<div class=\"field\"><label for=\"status\">Status</label>\
         <select id=\"status\" name=\"status\">",
    );
    let current = form.status.trim();
    for status in ReservationStatus::ALL {
        let s = status.as_str();
        let sel = if s == current { " selected" } else { "" };
        let _ = write!(body, "<option value=\"{s}\"{sel}>{s}</option>");
    }
    body.push_str("</select>");
    body.push_str(&error(errors, "status"));
    body.push_str("</div>");

    let _ = write!(
        body,
        "<div class=\"form-actions\"><button type=\"submit\" class=\"btn\">{}</button>\
<a class=\"btn-outline\" href=\"/reservations\">Cancel</a></div></form>",
        target.submit_label()
    );

    layout(target.title(), &body)
}

fn error(errors: &FieldErrors, field: &str) -> String {
    errors
        .get(field)
        .map(|message| format!("<div class=\"error\">{}</div>", escape(message)))
        .unwrap_or_default()
}
