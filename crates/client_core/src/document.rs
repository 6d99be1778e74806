//! Plain-text SOW document assembly.

use chrono::{Local, NaiveDateTime};
use shared::protocol::{CustomerDetail, SowDetail};

pub const GENERATION_FAILED_TEXT: &str =
    "Error generating SOW. Please check the logs for details.";

const DEFAULT_SUPPORT_HEADING: &str = "TECH SUPPORT CONTACT INFORMATION:";
const DEFAULT_SUPPORT_LINE: &str = "BTC Power Technical Support Hotline 1-855-901-1558";

/// Boilerplate placed under the timestamp of every generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTemplate {
    pub support_heading: String,
    pub support_line: String,
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        Self {
            support_heading: DEFAULT_SUPPORT_HEADING.into(),
            support_line: DEFAULT_SUPPORT_LINE.into(),
        }
    }
}

/// `M/D/YYYY, h:mm:ss AM` in local time.
pub fn local_timestamp() -> String {
    format_timestamp(Local::now().naive_local())
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn push_labelled_line(out: &mut String, label: &str, field: &Option<String>) {
    if let Some(value) = present(field) {
        out.push_str(label);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
}

fn push_block(out: &mut String, heading: &str, field: &Option<String>) {
    if let Some(value) = present(field) {
        out.push_str(heading);
        out.push('\n');
        out.push_str(value);
        out.push_str("\n\n");
    }
}

/// Renders the document. The customer detail, when given, feeds both the
/// check-in block ahead of the SOW fields and the check-out block after them.
pub fn render_document(
    template: &DocumentTemplate,
    timestamp: &str,
    sow: &SowDetail,
    customer: Option<&CustomerDetail>,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("SOW Created [{timestamp}]\n"));
    out.push_str(&template.support_heading);
    out.push('\n');
    out.push_str(&template.support_line);
    out.push_str("\n\n");

    if let Some(customer) = customer {
        out.push_str("CUSTOMER CHECK-IN INFORMATION\n");
        push_labelled_line(&mut out, "Check-in Contact", &customer.check_in_contact);
        push_labelled_line(&mut out, "Check-in Phone", &customer.check_in_phone);
        push_labelled_line(
            &mut out,
            "Check-in Instructions",
            &customer.check_in_instructions,
        );
        out.push('\n');
    }

    out.push_str("Title\n");
    out.push_str(sow.title.as_deref().unwrap_or_default());
    out.push_str("\n\n");
    push_block(&mut out, "MAINTENANCE SCOPE", &sow.maintenance_scope);
    push_block(&mut out, "PARTS", &sow.parts);
    push_block(&mut out, "TOOLS", &sow.tools);
    push_block(&mut out, "DOCUMENTS", &sow.documents);
    push_block(&mut out, "SERVICE INSTRUCTIONS", &sow.service_instructions);

    if let Some(customer) = customer {
        out.push_str("CUSTOMER CHECK-OUT INFORMATION\n");
        push_labelled_line(&mut out, "Check-out Contact", &customer.check_out_contact);
        push_labelled_line(&mut out, "Check-out Phone", &customer.check_out_phone);
        push_labelled_line(
            &mut out,
            "Check-out Instructions",
            &customer.check_out_instructions,
        );
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    const TS: &str = "10/17/2026, 3:04:05 PM";

    fn titled(title: &str) -> SowDetail {
        SowDetail {
            title: Some(title.into()),
            ..SowDetail::default()
        }
    }

    #[test]
    fn formats_timestamp_like_a_us_locale() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 17)
            .and_then(|d| d.and_hms_opt(15, 4, 5))
            .expect("valid datetime");
        assert_eq!(format_timestamp(at), TS);

        let morning = NaiveDate::from_ymd_opt(2026, 1, 2)
            .and_then(|d| d.and_hms_opt(0, 30, 0))
            .expect("valid datetime");
        assert_eq!(format_timestamp(morning), "1/2/2026, 12:30:00 AM");
    }

    #[test]
    fn title_only_without_customer() {
        let text = render_document(&DocumentTemplate::default(), TS, &titled("T"), None);
        assert_eq!(
            text,
            "SOW Created [10/17/2026, 3:04:05 PM]\n\
             TECH SUPPORT CONTACT INFORMATION:\n\
             BTC Power Technical Support Hotline 1-855-901-1558\n\n\
             Title\nT"
        );
        assert!(!text.contains("CHECK-IN"));
        assert!(!text.contains("CHECK-OUT"));
    }

    #[test]
    fn sow_fields_follow_fixed_order_and_skip_blanks() {
        let sow = SowDetail {
            title: Some("PM".into()),
            maintenance_scope: Some("Inspect cabinet".into()),
            parts: Some(String::new()),
            tools: Some("Torque wrench".into()),
            documents: None,
            service_instructions: Some("Log readings".into()),
        };
        let text = render_document(&DocumentTemplate::default(), TS, &sow, None);
        let body = text.split_once("Title\n").expect("title block").1;
        assert_eq!(
            body,
            "PM\n\nMAINTENANCE SCOPE\nInspect cabinet\n\nTOOLS\nTorque wrench\n\n\
             SERVICE INSTRUCTIONS\nLog readings"
        );
    }

    #[test]
    fn single_check_in_field_yields_one_labelled_line() {
        let customer = CustomerDetail {
            check_in_contact: Some("Dana".into()),
            ..CustomerDetail::default()
        };
        let text = render_document(
            &DocumentTemplate::default(),
            TS,
            &titled("T"),
            Some(&customer),
        );

        let check_in = text
            .split_once("CUSTOMER CHECK-IN INFORMATION\n")
            .expect("check-in block")
            .1
            .split_once("\n\n")
            .expect("block terminator")
            .0;
        assert_eq!(check_in, "Check-in Contact: Dana");
        assert!(text.ends_with("Title\nT\n\nCUSTOMER CHECK-OUT INFORMATION"));
    }

    #[test]
    fn check_out_block_closes_the_document() {
        let customer = CustomerDetail {
            check_out_phone: Some("555-0100".into()),
            check_out_instructions: Some("Badge out at gate".into()),
            ..CustomerDetail::default()
        };
        let text = render_document(
            &DocumentTemplate::default(),
            TS,
            &titled("T"),
            Some(&customer),
        );
        assert!(text.ends_with(
            "CUSTOMER CHECK-OUT INFORMATION\n\
             Check-out Phone: 555-0100\n\
             Check-out Instructions: Badge out at gate"
        ));
    }

    #[test]
    fn custom_support_block() {
        let template = DocumentTemplate {
            support_heading: "SUPPORT:".into(),
            support_line: "Call 1-800-000-0000".into(),
        };
        let text = render_document(&template, TS, &titled("T"), None);
        assert!(text.contains("SUPPORT:\nCall 1-800-000-0000\n\nTitle\nT"));
    }
}
