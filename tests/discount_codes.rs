//! Discount code behaviour, observed through a recording instrumentation sink.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::GBP};
use testresult::TestResult;
use trolley::{
    carts::ShoppingCart,
    catalog::DiscountCatalog,
    discounts::Discount,
    instrumentation::recording::{CartEvent, RecordingInstrumentation},
    products::Product,
};

fn kinder_bueno() -> Product<'static> {
    Product::new("Kinder Bueno", Money::from_minor(1_00, GBP))
}

fn iphone() -> Product<'static> {
    Product::new("iPhone", Money::from_minor(1_000_00, GBP))
}

#[test]
fn adding_fires_a_pre_and_post_event_pair() -> TestResult {
    let catalog = DiscountCatalog::default();
    let recorder = RecordingInstrumentation::new();
    let mut cart = ShoppingCart::new(&catalog, &recorder, GBP);
    let product = iphone();

    cart.add(&product)?;

    let events = recorder.events();

    assert_eq!(
        events,
        vec![
            CartEvent::AddingProduct {
                cart: cart.id(),
                product: product.id(),
            },
            CartEvent::AddedProduct {
                cart: cart.id(),
                product: product.id(),
                total_minor: 100_000,
                len: 1,
            },
        ]
    );

    Ok(())
}

#[test]
fn reapplying_a_code_overwrites_rather_than_stacks() -> TestResult {
    let catalog = DiscountCatalog::default();
    let recorder = RecordingInstrumentation::new();
    let mut cart = ShoppingCart::new(&catalog, &recorder, GBP);

    cart.add(&iphone())?;

    cart.apply_discount_code("10")?;
    assert_eq!(cart.discount_amount(), Money::from_minor(10_000, GBP));
    assert_eq!(cart.total(), Money::from_minor(90_000, GBP));

    cart.apply_discount_code("20")?;
    assert_eq!(cart.discount_amount(), Money::from_minor(20_000, GBP));
    assert_eq!(cart.total(), Money::from_minor(80_000, GBP));

    let applied: Vec<CartEvent> = recorder
        .events()
        .into_iter()
        .filter(|event| matches!(event, CartEvent::DiscountApplied { .. }))
        .collect();

    // Two successful applications, each replacing the stored amount.
    assert_eq!(
        applied,
        vec![
            CartEvent::DiscountApplied {
                code: "10".to_string(),
                amount_minor: 10_000,
            },
            CartEvent::DiscountApplied {
                code: "20".to_string(),
                amount_minor: 20_000,
            },
        ]
    );

    Ok(())
}

#[test]
fn unknown_code_fires_exactly_one_failure_event() -> TestResult {
    let catalog = DiscountCatalog::default();
    let recorder = RecordingInstrumentation::new();
    let mut cart = ShoppingCart::new(&catalog, &recorder, GBP);

    cart.add(&kinder_bueno())?;

    let amount = cart.apply_discount_code("X")?;
    assert_eq!(amount, Money::from_minor(0, GBP));
    assert_eq!(cart.total(), Money::from_minor(1_00, GBP));

    let failures: Vec<CartEvent> = recorder
        .events()
        .into_iter()
        .filter(|event| matches!(event, CartEvent::DiscountLookupFailed { .. }))
        .collect();

    assert_eq!(
        failures,
        vec![CartEvent::DiscountLookupFailed {
            code: "X".to_string(),
        }]
    );

    Ok(())
}

#[test]
fn failed_lookup_preserves_a_previously_applied_discount() -> TestResult {
    let catalog = DiscountCatalog::default();
    let recorder = RecordingInstrumentation::new();
    let mut cart = ShoppingCart::new(&catalog, &recorder, GBP);

    cart.add(&iphone())?;
    cart.apply_discount_code("10")?;
    cart.apply_discount_code("X")?;

    assert_eq!(cart.discount_amount(), Money::from_minor(10_000, GBP));
    assert_eq!(cart.total(), Money::from_minor(90_000, GBP));

    Ok(())
}

#[test]
fn empty_cart_application_still_fires_discount_applied() -> TestResult {
    let catalog = DiscountCatalog::default();
    let recorder = RecordingInstrumentation::new();
    let mut cart = ShoppingCart::new(&catalog, &recorder, GBP);

    let amount = cart.apply_discount_code("10")?;
    assert_eq!(amount, Money::from_minor(0, GBP));

    let events = recorder.events();

    assert_eq!(
        events,
        vec![
            CartEvent::ApplyingDiscountCode {
                code: "10".to_string(),
            },
            CartEvent::DiscountLookupSucceeded {
                code: "10".to_string(),
            },
            CartEvent::DiscountApplied {
                code: "10".to_string(),
                amount_minor: 0,
            },
        ]
    );

    Ok(())
}

#[test]
fn injected_catalog_entries_take_effect() -> TestResult {
    let catalog = DiscountCatalog::new([Discount::new("HALF", Percentage::from(0.50))]);
    let recorder = RecordingInstrumentation::new();
    let mut cart = ShoppingCart::new(&catalog, &recorder, GBP);

    cart.add(&iphone())?;
    cart.apply_discount_code("HALF")?;

    assert_eq!(cart.total(), Money::from_minor(50_000, GBP));

    Ok(())
}
