//! Static field tables, one per record kind

pub mod balance_sheet;
pub mod income_statement;
pub mod invoice;
pub mod purchase_order;
