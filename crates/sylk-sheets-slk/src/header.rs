//! Fixed SYLK header block

/// Number formats declared by the header; `F;P0` selects the first one
const NUMBER_FORMATS: &[&str] = &[
    "General",
    "0",
    "0.00",
    "#,##0",
    "#,##0.00",
    "0%",
    "0.00%",
    "0.00E+00",
    "@",
];

/// Header records, in order, for a document written by `program_id`
///
/// The block does not depend on the sheet contents.
pub fn header_records(program_id: &str) -> Vec<String> {
    let mut records = Vec::with_capacity(NUMBER_FORMATS.len() + 5);
    records.push(format!("ID;P{};N;E", program_id));
    records.extend(NUMBER_FORMATS.iter().map(|f| format!("P;P{}", f)));
    records.push("P;FCalibri;M220;L9".to_string());
    records.push("P;ECalibri;M220;L9".to_string());
    records.push("F;P0;DG0G8;M255".to_string());
    records.push("O;L;D;V0;K47;G100 0.001".to_string());
    records
}
