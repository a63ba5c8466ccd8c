//! Reservation list page

use std::fmt::Write;

use shared::listing::{ListQuery, PaginatedResponse, StatusFilter};
use shared::models::{Reservation, ReservationStatus};
use shared::time;

use super::{encode_component, escape, layout};

pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this reservation?";

/// Render one page of the list
pub fn render(
    page: &PaginatedResponse<Reservation>,
    query: &ListQuery,
    flash: Option<&str>,
) -> String {
    let search = query.q.as_deref().map(str::trim).unwrap_or_default();
    let filter = query.status_filter();

    let mut body = String::new();
    body.push_str(
        "<div class=\"header\"><h1>Reservations</h1>\
<a class=\"btn\" href=\"/reservations/create\">New</a></div>",
    );

    if let Some(message) = flash {
        let _ = write!(body, "<div class=\"flash\" role=\"status\">{}</div>", escape(message));
    }

    body.push_str(&filters(search, filter));

    body.push_str(
        "<div class=\"card\"><table><thead><tr>\
<th>Name</th><th>Phone</th><th>Party</th><th>When</th><th>Status</th>\
<th class=\"actions\">Actions</th></tr></thead><tbody>",
    );
    if page.data.is_empty() {
        body.push_str("<tr><td colspan=\"6\" class=\"empty\">No reservations found.</td></tr>");
    } else {
        for reservation in &page.data {
            body.push_str(&row(reservation));
        }
    }
    body.push_str("</tbody></table></div>");

    let _ = write!(
        body,
        "<div class=\"footer\"><div class=\"summary\">Showing {} - {} of {}</div>{}</div>",
        page.first_index(),
        page.last_index(),
        page.total,
        pager(page, search, filter),
    );

    layout("Reservations", &body)
}

fn filters(search: &str, filter: StatusFilter) -> String {
    let mut options = String::new();
    let _ = write!(
        options,
        "<option value=\"all\"{}>All statuses</option>",
        selected(filter == StatusFilter::All)
    );
    for status in ReservationStatus::ALL {
        let _ = write!(
            options,
            "<option value=\"{s}\"{sel}>{s}</option>",
            s = status.as_str(),
            sel = selected(filter == StatusFilter::Only(status)),
        );
    }

    format!(
        "<form class=\"filters\" method=\"get\" action=\"/reservations\">\
<input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search by name or phone...\">\
<select name=\"status\" onchange=\"this.form.submit()\">{options}</select>\
<button type=\"submit\" class=\"btn\">Search</button></form>",
        escape(search),
    )
}

fn row(reservation: &Reservation) -> String {
    let id = reservation.id;
    let status = reservation.status.as_str();
    format!(
        "<tr><td>{name}</td><td>{phone}</td><td>{party}</td><td>{when}</td>\
<td><span class=\"badge badge-{status}\">{status}</span></td>\
<td class=\"actions\"><a href=\"/reservations/{id}/edit\">Edit</a>\
<form method=\"post\" action=\"/reservations/{id}/delete\" style=\"display:inline\" \
onsubmit=\"return confirm('{DELETE_CONFIRM}')\">\
<button type=\"submit\" class=\"link-danger\">Delete</button></form></td></tr>",
        name = escape(&reservation.customer_name),
        phone = escape(&reservation.phone),
        party = reservation.party_size,
        when = time::format_display(&reservation.reserved_at),
    )
}

fn pager(page: &PaginatedResponse<Reservation>, search: &str, filter: StatusFilter) -> String {
    let href = |n: u32| {
        let mut url = format!("/reservations?page={n}");
        if !search.is_empty() {
            let _ = write!(url, "&amp;q={}", encode_component(search));
        }
        if filter != StatusFilter::All {
            let _ = write!(url, "&amp;status={}", filter.as_str());
        }
        url
    };

    let mut out = String::from("<nav class=\"pager\">");
    if page.has_previous() {
        let _ = write!(out, "<a href=\"{}\" rel=\"prev\">Prev</a>", href(page.page - 1));
    } else {
        out.push_str("<span class=\"disabled\">Prev</span>");
    }
    for n in 1..=page.total_pages {
        if n == page.page {
            let _ = write!(out, "<span class=\"current\" aria-current=\"page\">{n}</span>");
        } else {
            let _ = write!(out, "<a href=\"{}\">{n}</a>", href(n));
        }
    }
    if page.has_next() {
        let _ = write!(out, "<a href=\"{}\" rel=\"next\">Next</a>", href(page.page + 1));
    } else {
        out.push_str("<span class=\"disabled\">Next</span>");
    }
    out.push_str("</nav>");
    out
}

fn selected(yes: bool) -> &'static str {
    if yes { " selected" } else { "" }
}
