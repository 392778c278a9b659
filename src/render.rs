// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Text and JSON rendering of the dashboard view.

use crate::blockchain::PatientRecord;
use crate::dashboard::DashboardView;

const RULE: &str = "------------------------------------------------------------";

/// Render the view as terminal text.
///
/// The form sections and record list only appear once a wallet account is
/// connected.
pub fn render_text(view: &DashboardView) -> String {
    let balance = match &view.balance {
        Some(balance) => format!("{balance} {}", view.currency_symbol),
        None => "Loading...".to_string(),
    };

    let mut lines = vec![
        RULE.to_string(),
        format!(
            "Address: {}",
            view.account.as_deref().unwrap_or("Not connected")
        ),
        format!("Network: {}", view.network),
        format!("Balance: {balance}"),
    ];
    if let Some(is_owner) = view.is_owner {
        let role = if is_owner { "contract owner" } else { "not the contract owner" };
        lines.push(format!("Role:    {role}"));
    }
    lines.push(RULE.to_string());

    if view.account.is_none() {
        lines.push("Type `connect` to connect to your wallet.".to_string());
        return join(lines);
    }

    let form = &view.form;
    lines.extend([
        "Fetch Patient Records".to_string(),
        format!("  patient-id: {}", placeholder(&form.patient_id, "Enter Patient ID")),
        "  -> `fetch`".to_string(),
        String::new(),
        "Add Patient Record".to_string(),
        format!("  name:       {}", placeholder(&form.patient_name, "(connected account)")),
        format!("  diagnosis:  {}", placeholder(&form.diagnosis, "Diagnosis")),
        format!("  treatment:  {}", placeholder(&form.treatment, "Treatment")),
        "  -> `add`".to_string(),
        String::new(),
        "Authorize HealthCare Provider".to_string(),
        format!("  provider:   {}", placeholder(&form.provider_address, "Provider Address")),
        "  -> `authorize`".to_string(),
    ]);

    if !view.records.is_empty() {
        lines.push(String::new());
        lines.push(format!("Patient Records ({})", view.records.len()));
        lines.extend(view.records.iter().map(|r| format!("  {}", render_record(r))));
    }

    join(lines)
}

fn join(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render the view as pretty-printed JSON.
pub fn render_json(view: &DashboardView) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view)
}

fn render_record(record: &PatientRecord) -> String {
    let created = record
        .created_at()
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| record.timestamp.to_string());
    format!(
        "#{} {} | diagnosis: {} | treatment: {} | {}",
        record.record_id, record.patient_name, record.diagnosis, record.treatment, created
    )
}

fn placeholder<'a>(value: &'a str, hint: &'a str) -> &'a str {
    if value.is_empty() {
        hint
    } else {
        value
    }
}
