use super::*;

fn line(price: f64, quantity: i32) -> OrderLineItem {
    OrderLineItem {
        id: "app_1".to_string(),
        name: "Spring Rolls".to_string(),
        price,
        quantity,
    }
}

#[test]
fn test_to_decimal_precision() {
    // Classic floating point problem: 0.1 + 0.2 != 0.3
    let a = 0.1_f64;
    let b = 0.2_f64;
    let sum_f64 = a + b;

    // f64 fails
    assert_ne!(sum_f64, 0.3);

    // Decimal succeeds
    let sum_dec = to_decimal(a) + to_decimal(b);
    assert_eq!(to_f64(sum_dec), 0.3);
}

#[test]
fn test_accumulation_precision() {
    // Sum 0.01 one thousand times
    let mut total = Decimal::ZERO;
    for _ in 0..1000 {
        total += to_decimal(0.01);
    }
    assert_eq!(to_f64(total), 10.0);
}

#[test]
fn test_line_total() {
    assert_eq!(to_f64(line_total(&line(8.99, 3))), 26.97);
}

#[test]
fn test_order_total_matches_item_sum() {
    let items = vec![line(8.99, 1), line(24.99, 2), line(3.50, 4)];
    assert_eq!(to_f64(order_total(&items)), 72.97);
}

#[test]
fn test_order_total_empty_is_zero() {
    assert_eq!(order_total(&[]), Decimal::ZERO);
}

#[test]
fn test_format_usd() {
    assert_eq!(format_usd(to_decimal(8.99)), "$8.99");
    assert_eq!(format_usd(to_decimal(3.5)), "$3.50");
    assert_eq!(format_usd(Decimal::ZERO), "$0.00");
}
