//! Initial database migration.
//!
//! Creates all enums, tables, indexes, and the updated_at trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: USERS & CONTACTS
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(CONTACTS_SQL).await?;

        // ============================================================
        // PART 3: COST CENTERS & BUDGETS
        // ============================================================
        db.execute_unprepared(COST_CENTERS_SQL).await?;
        db.execute_unprepared(BUDGETS_SQL).await?;
        db.execute_unprepared(BUDGET_LINES_SQL).await?;

        // ============================================================
        // PART 4: PRODUCTS & PURCHASING
        // ============================================================
        db.execute_unprepared(PRODUCTS_SQL).await?;
        db.execute_unprepared(PURCHASE_ORDERS_SQL).await?;
        db.execute_unprepared(VENDOR_BILLS_SQL).await?;

        // ============================================================
        // PART 5: INVOICING
        // ============================================================
        db.execute_unprepared(CUSTOMER_INVOICES_SQL).await?;
        db.execute_unprepared(INVOICE_LINES_SQL).await?;

        // ============================================================
        // PART 6: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- User roles
CREATE TYPE user_role AS ENUM ('admin', 'portal');

-- Contact classification
CREATE TYPE contact_type AS ENUM ('vendor', 'customer', 'all');

-- Cost center approval status
CREATE TYPE cost_center_status AS ENUM ('pending', 'active', 'rejected');

-- Vendor bill status (draft/rejected are excluded from spend)
CREATE TYPE bill_status AS ENUM ('draft', 'approved', 'paid', 'rejected');

-- Customer invoice state
CREATE TYPE invoice_state AS ENUM ('draft', 'open', 'paid');

-- Purchase order status
CREATE TYPE purchase_order_status AS ENUM ('rfq', 'purchase', 'cancelled');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    login VARCHAR(255) NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    role user_role NOT NULL DEFAULT 'portal',
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_login ON users(login) WHERE active = true;
";

const CONTACTS_SQL: &str = r"
CREATE TABLE contacts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    contact_type contact_type NOT NULL DEFAULT 'vendor',
    phone VARCHAR(50),
    city VARCHAR(100),
    state VARCHAR(100),
    country VARCHAR(100),
    pincode VARCHAR(20),
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_contacts_active_name ON contacts(name) WHERE active = true;
";

const COST_CENTERS_SQL: &str = r"
CREATE TABLE cost_centers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    code VARCHAR(50) NOT NULL UNIQUE,
    status cost_center_status NOT NULL DEFAULT 'pending',
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_cost_centers_active_name ON cost_centers(name) WHERE active = true;
";

const BUDGETS_SQL: &str = r"
CREATE TABLE budgets (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    cost_center_id UUID NOT NULL REFERENCES cost_centers(id),
    name VARCHAR(255) NOT NULL,
    fiscal_year INTEGER NOT NULL,
    date_from DATE NOT NULL,
    date_to DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- One budget per cost center per fiscal year; makes the concurrent
-- upsert race a constraint violation instead of a duplicate row.
CREATE UNIQUE INDEX idx_budgets_cost_center_year
    ON budgets(cost_center_id, fiscal_year);
";

const BUDGET_LINES_SQL: &str = r"
CREATE TABLE budget_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    budget_id UUID NOT NULL REFERENCES budgets(id) ON DELETE CASCADE,
    planned_amount NUMERIC(19, 4) NOT NULL CHECK (planned_amount >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_budget_lines_budget ON budget_lines(budget_id);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    sale_price NUMERIC(19, 4) NOT NULL DEFAULT 0,
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const PURCHASE_ORDERS_SQL: &str = r"
CREATE TABLE purchase_orders (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    order_number VARCHAR(100) NOT NULL UNIQUE,
    vendor_id UUID NOT NULL REFERENCES contacts(id),
    cost_center_id UUID NOT NULL REFERENCES cost_centers(id),
    status purchase_order_status NOT NULL DEFAULT 'rfq',
    date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const VENDOR_BILLS_SQL: &str = r"
CREATE TABLE vendor_bills (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    bill_number VARCHAR(100) NOT NULL UNIQUE,
    vendor_id UUID NOT NULL REFERENCES contacts(id),
    cost_center_id UUID NOT NULL REFERENCES cost_centers(id),
    purchase_order_id UUID REFERENCES purchase_orders(id),
    amount NUMERIC(19, 4) NOT NULL,
    status bill_status NOT NULL DEFAULT 'draft',
    date DATE NOT NULL,
    due_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_vendor_bills_cost_center ON vendor_bills(cost_center_id);
CREATE INDEX idx_vendor_bills_status ON vendor_bills(status);
";

const CUSTOMER_INVOICES_SQL: &str = r"
CREATE TABLE customer_invoices (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    invoice_number VARCHAR(100) NOT NULL UNIQUE,
    customer_id UUID NOT NULL REFERENCES contacts(id),
    state invoice_state NOT NULL DEFAULT 'draft',
    invoice_date DATE NOT NULL,
    amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_customer_invoices_customer ON customer_invoices(customer_id);
";

const INVOICE_LINES_SQL: &str = r"
CREATE TABLE invoice_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    invoice_id UUID NOT NULL REFERENCES customer_invoices(id) ON DELETE CASCADE,
    product_id UUID REFERENCES products(id),
    cost_center_id UUID NOT NULL REFERENCES cost_centers(id),
    description VARCHAR(500) NOT NULL DEFAULT '',
    quantity NUMERIC(19, 4) NOT NULL CHECK (quantity >= 0),
    price NUMERIC(19, 4) NOT NULL CHECK (price >= 0),
    tax_percent NUMERIC(7, 4) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_invoice_lines_invoice ON invoice_lines(invoice_id);
CREATE INDEX idx_invoice_lines_cost_center ON invoice_lines(cost_center_id);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

DO $$
DECLARE
    t TEXT;
BEGIN
    FOR t IN
        SELECT unnest(ARRAY[
            'users', 'contacts', 'cost_centers', 'budgets', 'budget_lines',
            'products', 'purchase_orders', 'vendor_bills',
            'customer_invoices', 'invoice_lines'
        ])
    LOOP
        EXECUTE format(
            'CREATE TRIGGER trg_%s_updated_at
             BEFORE UPDATE ON %s
             FOR EACH ROW EXECUTE FUNCTION set_updated_at()',
            t, t
        );
    END LOOP;
END;
$$;
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS invoice_lines CASCADE;
DROP TABLE IF EXISTS customer_invoices CASCADE;
DROP TABLE IF EXISTS vendor_bills CASCADE;
DROP TABLE IF EXISTS purchase_orders CASCADE;
DROP TABLE IF EXISTS products CASCADE;
DROP TABLE IF EXISTS budget_lines CASCADE;
DROP TABLE IF EXISTS budgets CASCADE;
DROP TABLE IF EXISTS cost_centers CASCADE;
DROP TABLE IF EXISTS contacts CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP FUNCTION IF EXISTS set_updated_at CASCADE;

DROP TYPE IF EXISTS purchase_order_status;
DROP TYPE IF EXISTS invoice_state;
DROP TYPE IF EXISTS bill_status;
DROP TYPE IF EXISTS cost_center_status;
DROP TYPE IF EXISTS contact_type;
DROP TYPE IF EXISTS user_role;
";
