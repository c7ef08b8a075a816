//! # Seed Data
//!
//! The demo catalog: the five construction-supply products the shop opened
//! with. Used by the terminal app and the test suites.

use chrono::Utc;
use uuid::Uuid;

use inframex_core::{Money, Product};

/// Builds the demo product list.
///
/// Ids are generated fresh on every call; look products up by SKU or
/// barcode, not by id.
pub fn demo_products() -> Vec<Product> {
    vec![
        product(
            "TUBO-50-PVC",
            "7501234567890",
            "Tubo PVC 50mm",
            "Tubo de PVC para drenaje de 50mm",
            Money::from_major_minor(45, 50),
            Money::from_major_minor(32, 0),
            150,
            20,
            "pieza",
            "Tubería",
        ),
        product(
            "CEMEX-50KG",
            "7501234567891",
            "Cemento Cemex 50kg",
            "Cemento gris para construcción",
            Money::from_major_minor(125, 0),
            Money::from_major_minor(95, 0),
            80,
            10,
            "saco",
            "Cementos",
        ),
        product(
            "VAR-3-8",
            "7501234567892",
            "Varilla corrugada 3/8\"",
            "Varilla de acero para construcción 3/8\"",
            Money::from_major_minor(89, 0),
            Money::from_major_minor(65, 0),
            200,
            30,
            "pieza",
            "Acero",
        ),
        product(
            "ARENA-M3",
            "7501234567893",
            "Arena para construcción",
            "Arena lavada para concreto",
            Money::from_major_minor(450, 0),
            Money::from_major_minor(320, 0),
            15,
            5,
            "m3",
            "Materiales Básicos",
        ),
        product(
            "GRAVA-M3",
            "7501234567894",
            "Grava triturada 3/4\"",
            "Grava para concreto y filtros",
            Money::from_major_minor(520, 0),
            Money::from_major_minor(380, 0),
            12,
            5,
            "m3",
            "Materiales Básicos",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn product(
    sku: &str,
    barcode: &str,
    name: &str,
    description: &str,
    price: Money,
    cost: Money,
    stock: i64,
    min_stock: i64,
    unit: &str,
    category: &str,
) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4().to_string(),
        sku: sku.to_string(),
        barcode: Some(barcode.to_string()),
        name: name.to_string(),
        description: Some(description.to_string()),
        price_cents: price.cents(),
        cost_cents: Some(cost.cents()),
        stock,
        min_stock,
        unit: unit.to_string(),
        category: category.to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_products_are_well_formed() {
        let products = demo_products();
        assert_eq!(products.len(), 5);

        for p in &products {
            assert!(p.is_active);
            assert!(p.price_cents >= 0);
            assert!(p.stock >= 0);
            assert!(p.stock > p.min_stock, "seed data starts above threshold");
        }
    }

    #[test]
    fn test_demo_prices() {
        let products = demo_products();
        let tubo = products.iter().find(|p| p.sku == "TUBO-50-PVC").unwrap();
        assert_eq!(tubo.price_cents, 4550); // $45.50

        let grava = products.iter().find(|p| p.sku == "GRAVA-M3").unwrap();
        assert_eq!(grava.price_cents, 52000); // $520.00
        assert_eq!(grava.stock, 12);
    }
}
