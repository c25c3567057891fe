use crate::cli::OutputFormat;
use barber::display::{
    appointment_type_label, format_day, format_timestamp, status_label, swipe_hint, swipe_label,
};
use barber::error::get_error_info;
use barber::workflow::Section;
use barber::{BarberError, BoardView, Customer, StaffSession, SwipeDirection};
use itertools::Itertools;
use serde_json::json;

pub fn emit_output(output: &OutputFormat, command: &str, payload: serde_json::Value) {
    match output {
        OutputFormat::Text => payload
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| println!("{payload}"), |msg| println!("{msg}")),
        OutputFormat::Json => println!(
            "{}",
            json!({
                "command": command,
                "status": "ok",
                "payload": payload,
            })
        ),
    }
}

/// Signed-in staff member as shown in list headers.
#[must_use]
pub fn staff_payload(session: &StaffSession) -> serde_json::Value {
    json!({
        "uid": session.uid(),
        "name": session.display_name(),
        "email": session.email(),
    })
}

#[must_use]
pub fn error_envelope(command: &str, error: &BarberError) -> serde_json::Value {
    let fix = get_error_info(error.code()).map(|(_, fix)| fix);
    json!({
        "command": command,
        "status": "error",
        "error": {
            "code": error.code(),
            "message": error.to_string(),
            "fix": fix,
        },
    })
}

pub fn emit_error(output: &OutputFormat, command: &str, error: &BarberError) {
    match output {
        OutputFormat::Text => eprintln!("Error: {error}"),
        OutputFormat::Json => println!("{}", error_envelope(command, error)),
    }
}

/// Plain-text rendering of an appointment board, one card per line.
#[must_use]
pub fn render_board(view: &BoardView<Vec<Section>>) -> String {
    match view {
        BoardView::Loading => "Cargando...".to_string(),
        BoardView::Failed { message } => format!("Error: {message}"),
        BoardView::Empty { title, hint } => format!("{title}\n{hint}"),
        BoardView::Ready(sections) => sections
            .iter()
            .flat_map(|section| {
                section
                    .heading
                    .as_ref()
                    .map(barber::workflow::SectionHeading::label)
                    .into_iter()
                    .chain(section.items.iter().map(|appointment| {
                        let actions = appointment.swipe_actions();
                        let gestures = [SwipeDirection::Left, SwipeDirection::Right]
                            .into_iter()
                            .filter_map(|direction| {
                                swipe_label(actions, direction)
                                    .map(|label| format!("{direction}: {label}"))
                            })
                            .join(", ");
                        let hint = swipe_hint(actions)
                            .map(|hint| format!("  {hint} [{gestures}]"))
                            .unwrap_or_default();
                        format!(
                            "  {} | {} | {} {} | {} | {}{}",
                            appointment.id,
                            appointment.user_name,
                            format_day(appointment.date),
                            appointment.time_slot,
                            appointment_type_label(&appointment.kind),
                            status_label(&appointment.status),
                            hint
                        )
                    }))
            })
            .join("\n"),
    }
}

#[must_use]
pub fn render_roster(view: &BoardView<Vec<Customer>>) -> String {
    match view {
        BoardView::Loading => "Cargando...".to_string(),
        BoardView::Failed { message } => format!("Error: {message}"),
        BoardView::Empty { title, hint } => format!("{title}\n{hint}"),
        BoardView::Ready(customers) => customers
            .iter()
            .map(|customer| {
                format!(
                    "  {} | {} | Última interacción: {}",
                    customer.name,
                    customer.phone,
                    format_timestamp(customer.last_interaction)
                )
            })
            .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::{error_envelope, render_board, render_roster, staff_payload};
    use barber::workflow::split_sections;
    use barber::{
        Appointment, AppointmentFilter, AppointmentId, BarberError, BoardView, Customer,
        CustomerId, StaffSession, StaffUid,
    };

    #[test]
    fn error_envelope_carries_code_and_fix() {
        let envelope = error_envelope(
            "swipe",
            &BarberError::Unauthorized("no staff session".to_string()),
        );
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["error"]["code"], "UNAUTHORIZED");
        assert!(envelope["error"]["fix"]
            .as_str()
            .is_some_and(|fix| fix.contains("BARBER_STAFF_UID")));
    }

    #[test]
    fn board_text_lists_headings_and_gestures() {
        let sections = split_sections(
            vec![
                Appointment::new(AppointmentId::new("b"), "processing"),
                Appointment::new(AppointmentId::new("a"), "pending"),
            ],
            AppointmentFilter::Active,
        );
        let text = render_board(&BoardView::Ready(sections));

        assert!(text.contains("En Proceso (1)"));
        assert!(text.contains("Pendientes (1)"));
        assert!(text.contains("right: Completada"));
        assert!(text.contains("right: En proceso"));
    }

    #[test]
    fn empty_views_print_title_and_hint() {
        let text = render_roster(&BoardView::Empty {
            title: "No hay clientes",
            hint: "Aún no hay clientes registrados",
        });
        assert_eq!(text, "No hay clientes\nAún no hay clientes registrados");
    }

    #[test]
    fn staff_payload_carries_name_and_email() {
        let session = StaffSession::new(StaffUid::new("staff-1"))
            .with_display_name("Marta")
            .with_email("marta@example.com");
        let payload = staff_payload(&session);
        assert_eq!(payload["uid"], "staff-1");
        assert_eq!(payload["name"], "Marta");
        assert_eq!(payload["email"], "marta@example.com");

        let anonymous = staff_payload(&StaffSession::new(StaffUid::new("staff-2")));
        assert_eq!(anonymous["name"], "User");
        assert_eq!(anonymous["email"], "");
    }

    #[test]
    fn roster_rows_label_the_last_interaction() {
        let customer = Customer::new(CustomerId::new("c1"), "Rosa", "555-0101");
        let text = render_roster(&BoardView::Ready(vec![customer]));
        assert!(text.starts_with("  Rosa | 555-0101 | Última interacción: "));
    }
}
