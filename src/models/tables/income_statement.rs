//! Income statement (BOL "IC") field table

use crate::models::schema::{FieldSpec, FieldType};

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("company_id", "company_id", FieldType::String),
    FieldSpec::nullable("company_name", "company_name", FieldType::String),
    FieldSpec::required("year", "year", FieldType::Integer),
    FieldSpec::amount(
        "Revenue from sales and services",
        "revenue_from_sales_and_services",
    ),
    FieldSpec::amount("Other revenues", "other_revenues"),
    FieldSpec::amount("Total revenues", "total_revenues"),
    FieldSpec::amount("Cost of sales and services", "cost_of_sales_and_services"),
    FieldSpec::amount("Gross profit (loss)", "gross_profit_loss"),
    FieldSpec::amount("Selling expenses", "selling_expenses"),
    FieldSpec::amount("Administrative expenses", "administrative_expenses"),
    FieldSpec::amount("Other expenses", "other_expenses"),
    FieldSpec::amount("Total expenses", "total_expenses"),
    FieldSpec::amount(
        "Profit (loss) before finance costs and income tax expense",
        "profit_loss_before_finance_costs_and_income_tax_expense",
    ),
    FieldSpec::amount("Finance costs", "finance_costs"),
    FieldSpec::amount(
        "Profit (loss) before income tax expense",
        "profit_loss_before_income_tax_expense",
    ),
    FieldSpec::amount("Income tax expense", "income_tax_expense"),
    FieldSpec::amount("Net profit (loss)", "net_profit_loss"),
    FieldSpec::amount("Other comprehensive income", "other_comprehensive_income"),
    FieldSpec::amount("Total comprehensive income", "total_comprehensive_income"),
    FieldSpec::amount(
        "Depreciation and amortization",
        "depreciation_and_amortization",
    ),
    FieldSpec::amount(
        "Basic earnings (loss) per share",
        "basic_earnings_loss_per_share",
    ),
];
