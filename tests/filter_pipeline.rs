//! Integration test for the product filter pipeline.
//!
//! Runs the list-view path end to end: ingest raw rows, annotate outliers,
//! then apply the comparability gate plus category, search, and trend
//! filters over a small catalog with price history.

use rust_decimal::Decimal;
use serde_json::json;
use testresult::TestResult;

use chango::prelude::*;

fn ingest(row: serde_json::Value) -> TestResult<Product> {
    let raw: RawProductRow = serde_json::from_value(row)?;
    Ok(Product::from_raw(&raw))
}

fn catalog() -> TestResult<Vec<Product>> {
    let mut products = vec![
        ingest(json!({
            "id": 1,
            "nombre": "Asado de tira",
            "ticker": "ASADO",
            "categoria": "Carnes",
            "p_coto": 9000, "pr_coto": 9500, "url_coto": "https://coto.example/p/1",
            "p_dia": 8800, "pr_dia": 9200, "url_dia": "https://dia.example/p/1",
        }))?,
        ingest(json!({
            "id": 2,
            "nombre": "Manzana roja",
            "categoria": "Frutas y verduras",
            "p_coto": 1200, "pr_coto": 1300, "url_coto": "https://coto.example/p/2",
            "p_jumbo": 1150, "pr_jumbo": 1250, "url_jumbo": "https://jumbo.example/p/2",
        }))?,
        // Only one store carries it: never listed.
        ingest(json!({
            "id": 3,
            "nombre": "Pollo entero",
            "categoria": "Carnes",
            "p_coto": 4000, "pr_coto": 4200, "url_coto": "https://coto.example/p/3",
        }))?,
        // Two prices, but one is out of stock: never listed either.
        ingest(json!({
            "id": 4,
            "nombre": "Cerveza rubia lata",
            "categoria": "Bebidas",
            "p_coto": 1500, "pr_coto": 1600, "url_coto": "https://coto.example/p/4",
            "p_dia": 1450, "pr_dia": 1550, "url_dia": "https://dia.example/p/4",
            "stock_dia": false,
        }))?,
    ];

    annotate_outliers(&mut products);
    Ok(products)
}

#[test]
fn only_products_with_two_usable_prices_are_listed() -> TestResult {
    let products = catalog()?;

    let listed = filter_products(&products, &[], &FilterParams::default());
    let names: Vec<&str> = listed.iter().map(|s| s.product.name.as_str()).collect();

    assert_eq!(names, vec!["Asado de tira", "Manzana roja"]);
    Ok(())
}

#[test]
fn category_filters_partition_by_keyword() -> TestResult {
    let products = catalog()?;

    let carnes = filter_products(
        &products,
        &[],
        &FilterParams {
            category: Some(Category::Carnes),
            ..FilterParams::default()
        },
    );
    assert_eq!(carnes.len(), 1);
    assert_eq!(carnes[0].product.name, "Asado de tira");

    let verdu = filter_products(
        &products,
        &[],
        &FilterParams {
            category: Some(Category::Verdu),
            ..FilterParams::default()
        },
    );
    assert_eq!(verdu.len(), 1);
    assert_eq!(verdu[0].product.name, "Manzana roja");

    Ok(())
}

#[test]
fn search_matches_name_and_ticker() -> TestResult {
    let products = catalog()?;

    let by_name = filter_products(
        &products,
        &[],
        &FilterParams {
            search: Some("manzana".into()),
            ..FilterParams::default()
        },
    );
    assert_eq!(by_name.len(), 1);

    let by_ticker = filter_products(
        &products,
        &[],
        &FilterParams {
            search: Some("asado".into()),
            ..FilterParams::default()
        },
    );
    assert_eq!(by_ticker.len(), 1);
    assert_eq!(by_ticker[0].product.name, "Asado de tira");

    Ok(())
}

#[test]
fn trend_filter_compares_against_the_history_baseline() -> TestResult {
    let products = catalog()?;
    let history = vec![
        // Asado: baseline 8000, today 8800 -> up 10%.
        PricePoint {
            product_name: "Asado de tira".into(),
            date: "2026-08-01".into(),
            min_price: Decimal::new(8000, 0),
        },
        // Manzana: baseline 1200, today 1150 -> down 4.2%.
        PricePoint {
            product_name: "Manzana roja".into(),
            date: "2026-08-01".into(),
            min_price: Decimal::new(1200, 0),
        },
    ];

    let up = filter_products(
        &products,
        &history,
        &FilterParams {
            trend: Some(Trend::Up),
            ..FilterParams::default()
        },
    );
    assert_eq!(up.len(), 1);
    assert_eq!(up[0].product.name, "Asado de tira");
    assert_eq!(up[0].stats.change_pct, Decimal::new(100, 1));

    let down = filter_products(
        &products,
        &history,
        &FilterParams {
            trend: Some(Trend::Down),
            ..FilterParams::default()
        },
    );
    assert_eq!(down.len(), 1);
    assert_eq!(down[0].product.name, "Manzana roja");
    assert_eq!(down[0].stats.change_pct, Decimal::new(42, 1));

    Ok(())
}

#[test]
fn summaries_carry_min_and_average_prices() -> TestResult {
    let products = catalog()?;

    let listed = filter_products(&products, &[], &FilterParams::default());
    let manzana = listed
        .iter()
        .find(|s| s.product.name == "Manzana roja")
        .expect("manzana should be listed");

    assert_eq!(manzana.min_price, Some(Decimal::new(1150, 0)));
    // Average of 1200 and 1150.
    assert_eq!(manzana.avg_price, Some(Decimal::new(1175, 0)));

    Ok(())
}
