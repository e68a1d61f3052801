use crate::models::schema::{FieldSpec, FieldType};

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::nullable("invoice_no", "invoice_no", FieldType::String),
    FieldSpec::nullable("po_no", "po_no", FieldType::String),
    FieldSpec::nullable("invoice_date", "invoice_date", FieldType::Date),
    FieldSpec::nullable("supplier_name", "supplier_name", FieldType::String),
    FieldSpec::nullable("buyer_name", "buyer_name", FieldType::String),
    FieldSpec::amount("amount_excl_vat", "amount_excl_vat"),
    FieldSpec::amount("vat_amount", "vat_amount"),
    FieldSpec::amount("amount_incl_vat", "amount_incl_vat"),
];
