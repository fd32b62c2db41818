//! `SeaORM` entity definitions.

pub mod budget_lines;
pub mod budgets;
pub mod contacts;
pub mod cost_centers;
pub mod customer_invoices;
pub mod invoice_lines;
pub mod products;
pub mod purchase_orders;
pub mod sea_orm_active_enums;
pub mod users;
pub mod vendor_bills;
