//! Balance sheet (BOL "BS") field table

use crate::models::schema::{FieldSpec, FieldType};

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("company_id", "company_id", FieldType::String),
    FieldSpec::nullable("company_name", "company_name", FieldType::String),
    FieldSpec::required("year", "year", FieldType::Integer),
    FieldSpec::amount("Assets", "assets"),
    FieldSpec::amount(
        "Cash and deposits at financial institutions",
        "cash_and_deposits_at_financial_institutions",
    ),
    FieldSpec::amount("Accounts receivable", "accounts_receivable"),
    FieldSpec::amount(
        "Accounts and notes receivable - net",
        "accounts_and_notes_receivable_net",
    ),
    FieldSpec::amount(
        "Total short-term loans consolidation",
        "total_short_term_loans_consolidation",
    ),
    FieldSpec::amount("Inventories-net", "inventories_net"),
    FieldSpec::amount("Accrued income", "accrued_income"),
    FieldSpec::amount("Prepaid expenses", "prepaid_expenses"),
    FieldSpec::amount("Other current assets", "other_current_assets"),
    FieldSpec::amount(
        "Others - Total current assets",
        "others_total_current_assets",
    ),
    FieldSpec::amount("Total current assets", "total_current_assets"),
    FieldSpec::amount(
        "Total long-term loans and investments",
        "total_long_term_loans_and_investments",
    ),
    FieldSpec::amount(
        "Property, plant and equipment - net",
        "property_plant_and_equipment_net",
    ),
    FieldSpec::amount("Other non-current assets", "other_non_current_assets"),
    FieldSpec::amount(
        "Others - Total non-current assets",
        "others_total_non_current_assets",
    ),
    FieldSpec::amount("Total non-current assets", "total_non_current_assets"),
    FieldSpec::amount("Total assets", "total_assets"),
    FieldSpec::amount(
        "Liabilities and shareholders' equity",
        "liabilities_and_shareholders_equity",
    ),
    FieldSpec::amount("Liabilities", "liabilities"),
    FieldSpec::amount(
        "Bank overdrafts and short-term loans from financial institutions",
        "bank_overdrafts_and_short_term_loans_from_financial_institutions",
    ),
    FieldSpec::amount("Accounts payable", "accounts_payable"),
    FieldSpec::amount(
        "Total accounts payable and notes payable",
        "total_accounts_payable_and_notes_payable",
    ),
    FieldSpec::amount(
        "Current portion of long-term loans",
        "current_portion_of_long_term_loans",
    ),
    FieldSpec::amount("Total short-term loans", "total_short_term_loans"),
    FieldSpec::amount("Accrued expenses", "accrued_expenses"),
    FieldSpec::amount("Unearned revenues", "unearned_revenues"),
    FieldSpec::amount("Other current liabilities", "other_current_liabilities"),
    FieldSpec::amount(
        "Others - Total current liabilities",
        "others_total_current_liabilities",
    ),
    FieldSpec::amount("Total current liabilities", "total_current_liabilities"),
    FieldSpec::amount("Total long-term loans", "total_long_term_loans"),
    FieldSpec::amount(
        "Other non-current liabilities",
        "other_non_current_liabilities",
    ),
    FieldSpec::amount(
        "Others - Total non-current liabilities",
        "others_total_non_current_liabilities",
    ),
    FieldSpec::amount(
        "Total non-current liabilities",
        "total_non_current_liabilities",
    ),
    FieldSpec::amount("Total Liabilities", "total_liabilities"),
    FieldSpec::amount("Shareholder's equity", "shareholders_equity"),
    FieldSpec::amount("Authorized preferred stocks", "authorized_preferred_stocks"),
    FieldSpec::amount("Authorized common stocks", "authorized_common_stocks"),
    FieldSpec::amount(
        "Issued and paid-up preferred stocks",
        "issued_and_paid_up_preferred_stocks",
    ),
    FieldSpec::amount(
        "Issued and paid-up common stocks",
        "issued_and_paid_up_common_stocks",
    ),
    FieldSpec::amount(
        "Appraisal surplus on property, plant and equipment",
        "appraisal_surplus_on_property_plant_and_equipment",
    ),
    FieldSpec::amount(
        "Accumulated retained earnings",
        "accumulated_retained_earnings",
    ),
    FieldSpec::amount("Others", "others"),
    FieldSpec::amount("Total shareholders' equity", "total_shareholders_equity"),
    FieldSpec::amount(
        "Total liabilities and shareholders' equity",
        "total_liabilities_and_shareholders_equity",
    ),
    FieldSpec::amount(
        "Additional information for shareholders' equity",
        "additional_information_for_shareholders_equity",
    ),
    FieldSpec::amount("Common stocks", "common_stocks"),
    FieldSpec::nullable(
        "No.of shares - Authorized",
        "no_of_shares_authorized",
        FieldType::Integer,
    ),
    FieldSpec::amount("Par value (Baht) - Authorized", "par_value_baht_authorized"),
    FieldSpec::nullable(
        "No.of shares - Issued and paid-up",
        "no_of_shares_issued_and_paid_up",
        FieldType::Integer,
    ),
    FieldSpec::amount(
        "Par value (Baht) - Issued and Paid-up",
        "par_value_baht_issued_and_paid_up",
    ),
];
