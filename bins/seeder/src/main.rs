//! Database seeder for Costwise development and testing.
//!
//! Seeds demo users, cost centers, current-year budgets, contacts, and a
//! handful of transactions so the budget summary report has data to show.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, NaiveDate, Utc};
use costwise_core::auth::hash_password;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use costwise_db::entities::{
    budget_lines, budgets, contacts, cost_centers, customer_invoices, invoice_lines,
    sea_orm_active_enums::{BillStatus, ContactType, CostCenterStatus, InvoiceState, UserRole},
    users, vendor_bills,
};

/// Admin user ID (consistent for all seeds)
const ADMIN_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Portal user ID (consistent for all seeds)
const PORTAL_USER_ID: &str = "00000000-0000-0000-0000-000000000002";

/// Cost center codes with their planned amount for the current year.
const COST_CENTERS: &[(&str, &str, u32)] = &[
    ("Marketing", "MKT", 50_000),
    ("Operations", "OPS", 75_000),
    ("IT Infrastructure", "IT", 60_000),
    ("Human Resources", "HR", 40_000),
    ("Sales", "SALES", 80_000),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = costwise_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding users...");
    seed_users(&db).await;

    println!("Seeding contacts...");
    let (vendor_id, customer_id) = seed_contacts(&db).await;

    println!("Seeding cost centers and budgets...");
    let center_ids = seed_cost_centers_with_budgets(&db).await;

    println!("Seeding transactions...");
    seed_transactions(&db, vendor_id, customer_id, &center_ids).await;

    println!("Seeding complete!");
}

fn admin_user_id() -> Uuid {
    Uuid::parse_str(ADMIN_USER_ID).unwrap()
}

fn portal_user_id() -> Uuid {
    Uuid::parse_str(PORTAL_USER_ID).unwrap()
}

/// Seeds the admin and portal demo users.
async fn seed_users(db: &DatabaseConnection) {
    let demo = [
        (
            admin_user_id(),
            "Admin User",
            "admin@costwise.dev",
            "admin",
            UserRole::Admin,
        ),
        (
            portal_user_id(),
            "Portal User",
            "portal@costwise.dev",
            "portal",
            UserRole::Portal,
        ),
    ];

    for (id, name, email, login, role) in demo {
        if users::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  User {email} already exists, skipping...");
            continue;
        }

        let password_hash = hash_password("changeme123").expect("Failed to hash password");
        let now = Utc::now().into();
        let user = users::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            login: Set(login.to_string()),
            password_hash: Set(password_hash),
            role: Set(role),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        if let Err(e) = user.insert(db).await {
            eprintln!("Failed to insert user {email}: {e}");
        } else {
            println!("  Created user: {email}");
        }
    }
}

/// Seeds one vendor and one customer, returning their IDs.
async fn seed_contacts(db: &DatabaseConnection) -> (Uuid, Uuid) {
    let vendor_id = seed_contact(db, "Acme Supplies", "billing@acme.test", ContactType::Vendor).await;
    let customer_id =
        seed_contact(db, "Initech Corp", "accounts@initech.test", ContactType::Customer).await;
    (vendor_id, customer_id)
}

async fn seed_contact(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    contact_type: ContactType,
) -> Uuid {
    if let Ok(Some(existing)) = contacts::Entity::find()
        .filter(contacts::Column::Email.eq(email))
        .one(db)
        .await
    {
        println!("  Contact {email} already exists, skipping...");
        return existing.id;
    }

    let id = Uuid::new_v4();
    let now = Utc::now().into();
    let contact = contacts::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        contact_type: Set(contact_type),
        phone: Set(None),
        city: Set(None),
        state: Set(None),
        country: Set(None),
        pincode: Set(None),
        active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    match contact.insert(db).await {
        Ok(_) => println!("  Created contact: {email}"),
        Err(e) => eprintln!("Failed to insert contact {email}: {e}"),
    }

    id
}

/// Seeds the demo cost centers, each with a budget for the current year.
async fn seed_cost_centers_with_budgets(db: &DatabaseConnection) -> Vec<Uuid> {
    let year = Utc::now().year();
    let date_from = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
    let date_to = NaiveDate::from_ymd_opt(year, 12, 31).unwrap();

    let mut ids = Vec::with_capacity(COST_CENTERS.len());
    for &(name, code, planned) in COST_CENTERS {
        if let Ok(Some(existing)) = cost_centers::Entity::find()
            .filter(cost_centers::Column::Code.eq(code))
            .one(db)
            .await
        {
            println!("  Cost center {code} already exists, skipping...");
            ids.push(existing.id);
            continue;
        }

        let cc_id = Uuid::new_v4();
        let now = Utc::now().into();
        let cc = cost_centers::ActiveModel {
            id: Set(cc_id),
            name: Set(name.to_string()),
            code: Set(code.to_string()),
            status: Set(CostCenterStatus::Active),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        if let Err(e) = cc.insert(db).await {
            eprintln!("Failed to insert cost center {code}: {e}");
            continue;
        }

        let budget_id = Uuid::new_v4();
        let budget = budgets::ActiveModel {
            id: Set(budget_id),
            cost_center_id: Set(cc_id),
            name: Set(format!("{name} FY{year}")),
            fiscal_year: Set(year),
            date_from: Set(date_from),
            date_to: Set(date_to),
            created_at: Set(now),
            updated_at: Set(now),
        };

        if let Err(e) = budget.insert(db).await {
            eprintln!("Failed to insert budget for {code}: {e}");
            continue;
        }

        let line = budget_lines::ActiveModel {
            id: Set(Uuid::new_v4()),
            budget_id: Set(budget_id),
            planned_amount: Set(Decimal::from(planned)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        if let Err(e) = line.insert(db).await {
            eprintln!("Failed to insert budget line for {code}: {e}");
        } else {
            println!("  Created cost center {code} with a {planned} budget");
        }

        ids.push(cc_id);
    }

    ids
}

/// Seeds one paid bill per cost center at 10% of its budget, plus a
/// draft bill and an open invoice so every status shows up in reports.
async fn seed_transactions(
    db: &DatabaseConnection,
    vendor_id: Uuid,
    customer_id: Uuid,
    center_ids: &[Uuid],
) {
    let year = Utc::now().year();
    let bill_date = NaiveDate::from_ymd_opt(year, 3, 15).unwrap();

    if let Ok(Some(_)) = vendor_bills::Entity::find()
        .filter(vendor_bills::Column::BillNumber.eq("BILL-0001"))
        .one(db)
        .await
    {
        println!("  Transactions already seeded, skipping...");
        return;
    }

    for (index, (&cc_id, &(_, code, planned))) in
        center_ids.iter().zip(COST_CENTERS.iter()).enumerate()
    {
        let now = Utc::now().into();
        let bill = vendor_bills::ActiveModel {
            id: Set(Uuid::new_v4()),
            bill_number: Set(format!("BILL-{:04}", index + 1)),
            vendor_id: Set(vendor_id),
            cost_center_id: Set(cc_id),
            purchase_order_id: Set(None),
            amount: Set(Decimal::from(planned / 10)),
            status: Set(BillStatus::Paid),
            date: Set(bill_date),
            due_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        if let Err(e) = bill.insert(db).await {
            eprintln!("Failed to insert bill for {code}: {e}");
        }
    }

    // A draft bill that must not count as spend.
    if let Some(&first_cc) = center_ids.first() {
        let now = Utc::now().into();
        let draft = vendor_bills::ActiveModel {
            id: Set(Uuid::new_v4()),
            bill_number: Set("BILL-DRAFT-0001".to_string()),
            vendor_id: Set(vendor_id),
            cost_center_id: Set(first_cc),
            purchase_order_id: Set(None),
            amount: Set(Decimal::from(10_000u32)),
            status: Set(BillStatus::Draft),
            date: Set(bill_date),
            due_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        if let Err(e) = draft.insert(db).await {
            eprintln!("Failed to insert draft bill: {e}");
        }

        let invoice_id = Uuid::new_v4();
        let invoice = customer_invoices::ActiveModel {
            id: Set(invoice_id),
            invoice_number: Set("INV-0001".to_string()),
            customer_id: Set(customer_id),
            state: Set(InvoiceState::Open),
            invoice_date: Set(bill_date),
            // 2 * 100 * 1.18
            amount: Set(Decimal::from(236u32)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        if let Err(e) = invoice.insert(db).await {
            eprintln!("Failed to insert invoice: {e}");
        }

        let line = invoice_lines::ActiveModel {
            id: Set(Uuid::new_v4()),
            invoice_id: Set(invoice_id),
            product_id: Set(None),
            cost_center_id: Set(first_cc),
            description: Set("Consulting hours".to_string()),
            quantity: Set(Decimal::from(2u32)),
            price: Set(Decimal::from(100u32)),
            tax_percent: Set(Decimal::from(18u32)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        if let Err(e) = line.insert(db).await {
            eprintln!("Failed to insert invoice line: {e}");
        }
    }

    println!("  Created demo transactions");
}
