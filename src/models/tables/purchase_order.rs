use crate::models::schema::{FieldSpec, FieldType};

/// Purchase orders arrive with canonical field names already
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::nullable("po_no", "po_no", FieldType::String),
    FieldSpec::nullable("po_date", "po_date", FieldType::Date),
    FieldSpec::nullable("supplier_name", "supplier_name", FieldType::String),
    FieldSpec::nullable("buyer_name", "buyer_name", FieldType::String),
    FieldSpec::nullable("delivery_date", "delivery_date", FieldType::Date),
    FieldSpec::nullable("payment_term", "payment_term", FieldType::String),
    FieldSpec::amount("amount_excl_vat", "amount_excl_vat"),
    FieldSpec::amount("vat_amount", "vat_amount"),
    FieldSpec::amount("amount_incl_vat", "amount_incl_vat"),
];
