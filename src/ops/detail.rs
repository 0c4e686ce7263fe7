use chrono::NaiveDateTime;
use serde::Serialize;

use crate::model::record::{ChildRecord, ProjectRecord, ReadyToInvoice, non_empty};
use crate::model::record::{Invoice, UnpaidInvoice};
use crate::model::urgency::resolve_label;
use crate::ops::mapper::parse_instant;

/// Placeholder for missing values in detail output
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of the receivables table (issued invoices and ready-to-invoice work)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceivableRow {
    pub invoice: String,
    pub service_date: String,
    pub due_date: String,
    pub status: String,
    pub amount: String,
    pub comments: String,
}

/// One row of the payables table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayableRow {
    pub invoice_no: String,
    pub invoice_date: String,
    pub booked_date: String,
    pub received_date: String,
    pub amount: String,
    pub comments: String,
}

/// A record resolved for the detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub urgency: Option<String>,
    /// Label for the urgency tag, if it is a known one
    pub status_label: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub engineer: Option<String>,
    pub manager: Option<String>,
    pub team: Option<String>,
    /// Set for subprojects: the name of the owning project
    pub parent_name: Option<String>,
    pub reopen: Option<String>,
    pub receivables: Vec<ReceivableRow>,
    pub payables: Vec<PayableRow>,
}

fn owned(value: Option<&str>) -> Option<String> {
    non_empty(value).map(str::to_string)
}

fn or_na(value: Option<&str>) -> String {
    non_empty(value).unwrap_or(NOT_AVAILABLE).to_string()
}

/// `$1500`, `$12.5`; zero and missing amounts are shown as N/A
fn money(amount: Option<f64>) -> Option<String> {
    amount.filter(|a| *a != 0.0).map(|a| format!("${}", a))
}

fn invoice_status(payment_status: &str) -> String {
    match payment_status.to_lowercase().as_str() {
        "paid" => "Paid".to_string(),
        "void" => "Invoiced".to_string(),
        _ => payment_status.to_string(),
    }
}

fn due_date(value: Option<&str>) -> String {
    match non_empty(value) {
        Some(raw) => parse_instant(raw)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| raw.to_string()),
        None => NOT_AVAILABLE.to_string(),
    }
}

impl From<&Invoice> for ReceivableRow {
    fn from(inv: &Invoice) -> Self {
        ReceivableRow {
            invoice: or_na(inv.invoice_number.as_deref()),
            service_date: NOT_AVAILABLE.to_string(),
            due_date: due_date(inv.due_date.as_deref()),
            status: non_empty(inv.payment_status.as_deref())
                .map_or_else(|| "Ready to be Invoiced".to_string(), invoice_status),
            amount: money(inv.amount).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            comments: or_na(inv.comment.as_deref()),
        }
    }
}

impl From<&ReadyToInvoice> for ReceivableRow {
    fn from(r: &ReadyToInvoice) -> Self {
        ReceivableRow {
            invoice: or_na(r.invoice_number.as_deref()),
            service_date: or_na(r.service_date.as_deref()),
            due_date: due_date(r.due_date.as_deref()),
            status: non_empty(r.project_status.as_deref())
                .unwrap_or("Ready to be Invoiced")
                .to_string(),
            amount: money(r.price).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            comments: or_na(r.comments.as_deref()),
        }
    }
}

impl From<&UnpaidInvoice> for PayableRow {
    fn from(u: &UnpaidInvoice) -> Self {
        PayableRow {
            invoice_no: or_na(u.invoice_no.as_deref()),
            invoice_date: or_na(u.invoice_date.as_deref()),
            booked_date: or_na(u.booked_date.as_deref()),
            received_date: or_na(u.received_date.as_deref()),
            amount: money(u.amount).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            comments: or_na(u.comments.as_deref()),
        }
    }
}

impl DetailRecord {
    /// Detail for a top-level project, including its finance tables
    pub fn from_project(project: &ProjectRecord) -> Self {
        let receivables = project
            .invoices
            .iter()
            .map(ReceivableRow::from)
            .chain(project.ready_to_invoice.iter().map(ReceivableRow::from))
            .collect();
        DetailRecord {
            id: project.id.clone(),
            name: project.display_name().to_string(),
            description: owned(project.project_details.as_deref())
                .or_else(|| owned(project.subproject_details.as_deref())),
            urgency: owned(project.urgency.as_deref()),
            status_label: resolve_label(project.urgency.as_deref()).map(str::to_string),
            start: project.start.as_deref().and_then(parse_instant),
            end: project.end.as_deref().and_then(parse_instant),
            engineer: owned(project.assign_to.as_deref()),
            manager: owned(project.project_manager.as_deref()),
            team: owned(project.p_team.as_deref()),
            parent_name: None,
            reopen: owned(project.reopen_status.as_deref()),
            receivables,
            payables: project.unpaid_invoices.iter().map(PayableRow::from).collect(),
        }
    }

    /// Detail for a subproject. Team and manager fall back to the parent's
    /// when the child has none; the parent's name is recorded.
    pub fn from_child(child: &ChildRecord, parent: &ProjectRecord) -> Self {
        DetailRecord {
            id: child.id.clone(),
            name: child.display_name().to_string(),
            description: owned(child.project_details.as_deref())
                .or_else(|| owned(child.subproject_details.as_deref())),
            urgency: owned(child.urgency.as_deref()),
            status_label: resolve_label(child.urgency.as_deref()).map(str::to_string),
            start: child.start.as_deref().and_then(parse_instant),
            end: child.end.as_deref().and_then(parse_instant),
            engineer: owned(child.assign_to.as_deref()),
            manager: owned(child.project_manager.as_deref())
                .or_else(|| owned(parent.project_manager.as_deref())),
            team: owned(child.p_team.as_deref()).or_else(|| owned(parent.p_team.as_deref())),
            parent_name: Some(parent.display_name().to_string()),
            reopen: owned(child.reopen_status.as_deref()),
            receivables: Vec::new(),
            payables: Vec::new(),
        }
    }

    pub fn is_subproject(&self) -> bool {
        self.parent_name.is_some()
    }

    pub fn has_finance(&self) -> bool {
        !self.receivables.is_empty() || !self.payables.is_empty()
    }
}

/// Resolve a row id to its backing record: top-level projects first, then
/// every project's children. Returns `None` when nothing matches.
pub fn resolve_detail(records: &[ProjectRecord], id: &str) -> Option<DetailRecord> {
    if let Some(project) = records.iter().find(|p| p.id == id) {
        return Some(DetailRecord::from_project(project));
    }
    records.iter().find_map(|parent| {
        parent
            .children
            .iter()
            .find(|c| c.id == id)
            .map(|child| DetailRecord::from_child(child, parent))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<ProjectRecord> {
        serde_json::from_str(
            r#"[
              {"id":"P1","name":"Water Plant","start":"2024-01-01","end":"2024-02-01",
               "urgency":"red","project_manager":"Dana Smith","p_team":"Civil",
               "project_details":"Main works","assign_to":"Lee",
               "invoices":[
                 {"invoice_number":"INV-1","due_date":"2024-02-15T00:00:00","payment_status":"PAID","amount":1500,"comment":"first"},
                 {"invoice_number":"INV-2","payment_status":"void","amount":0}
               ],
               "ready_to_invoice":[{"service_date":"2024-01-20","price":12.5}],
               "unpaid_invoices":[{"invoice_no":"SUP-9","amount":300}],
               "children":[
                 {"id":"SP1_1","name":"Survey","start":"2024-01-02","end":"2024-01-05","urgency":"green",
                  "subproject_details":"Site survey","p_team":""},
                 {"id":"SP1_2","name":"Design","start":"2024-01-06","end":"2024-01-20",
                  "project_manager":"Kim Park","p_team":"Structures"}
               ]},
              {"id":"P2","name":"Bridge"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn resolves_top_level_project() {
        let detail = resolve_detail(&records(), "P1").unwrap();
        assert_eq!(detail.name, "Water Plant");
        assert_eq!(detail.description.as_deref(), Some("Main works"));
        assert_eq!(detail.status_label.as_deref(), Some("Very Urgent"));
        assert_eq!(detail.engineer.as_deref(), Some("Lee"));
        assert!(!detail.is_subproject());
    }

    #[test]
    fn child_inherits_missing_team_and_manager() {
        let detail = resolve_detail(&records(), "SP1_1").unwrap();
        assert_eq!(detail.parent_name.as_deref(), Some("Water Plant"));
        assert_eq!(detail.manager.as_deref(), Some("Dana Smith"));
        assert_eq!(detail.team.as_deref(), Some("Civil"));
        assert_eq!(detail.description.as_deref(), Some("Site survey"));
        assert_eq!(detail.status_label.as_deref(), Some("In Progress"));
        assert!(detail.receivables.is_empty());
    }

    #[test]
    fn child_keeps_its_own_team_and_manager() {
        let detail = resolve_detail(&records(), "SP1_2").unwrap();
        assert_eq!(detail.manager.as_deref(), Some("Kim Park"));
        assert_eq!(detail.team.as_deref(), Some("Structures"));
    }

    #[test]
    fn unknown_id_resolves_to_none() {
        assert!(resolve_detail(&records(), "P404").is_none());
        assert!(resolve_detail(&[], "P1").is_none());
    }

    #[test]
    fn resolution_is_idempotent() {
        let recs = records();
        assert_eq!(resolve_detail(&recs, "SP1_1"), resolve_detail(&recs, "SP1_1"));
        assert_eq!(resolve_detail(&recs, "P1"), resolve_detail(&recs, "P1"));
    }

    #[test]
    fn receivables_merge_invoices_then_ready_to_invoice() {
        let detail = resolve_detail(&records(), "P1").unwrap();
        assert_eq!(detail.receivables.len(), 3);

        let paid = &detail.receivables[0];
        assert_eq!(paid.invoice, "INV-1");
        assert_eq!(paid.status, "Paid");
        assert_eq!(paid.amount, "$1500");
        assert_eq!(paid.due_date, "2024-02-15");
        assert_eq!(paid.comments, "first");

        let void = &detail.receivables[1];
        assert_eq!(void.status, "Invoiced");
        assert_eq!(void.amount, NOT_AVAILABLE);
        assert_eq!(void.due_date, NOT_AVAILABLE);

        let ready = &detail.receivables[2];
        assert_eq!(ready.invoice, NOT_AVAILABLE);
        assert_eq!(ready.service_date, "2024-01-20");
        assert_eq!(ready.status, "Ready to be Invoiced");
        assert_eq!(ready.amount, "$12.5");
    }

    #[test]
    fn payables_fill_missing_with_na() {
        let detail = resolve_detail(&records(), "P1").unwrap();
        assert_eq!(
            detail.payables,
            vec![PayableRow {
                invoice_no: "SUP-9".into(),
                invoice_date: NOT_AVAILABLE.into(),
                booked_date: NOT_AVAILABLE.into(),
                received_date: NOT_AVAILABLE.into(),
                amount: "$300".into(),
                comments: NOT_AVAILABLE.into(),
            }]
        );
        assert!(detail.has_finance());
    }

    #[test]
    fn undated_project_still_resolves() {
        let detail = resolve_detail(&records(), "P2").unwrap();
        assert_eq!(detail.start, None);
        assert!(!detail.has_finance());
    }
}
