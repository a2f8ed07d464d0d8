//! Basic usage of fuzzkit
//!
//! Builds a record fuzzer out of primitives, registers batched and explained
//! tests on an in-process suite, and prints the results.

use fuzzkit::{
    TestSuite, array, fuzz, fuzz_explained, fuzz2, int, int_range, map3, one_of, string,
};

#[derive(Debug, Clone)]
struct Order {
    id: i64,
    customer: String,
    items: Vec<i64>,
}

fn main() {
    let orders = map3(&int(), &string(), &array(&int_range(1, 50).unwrap()), |id, customer, items| {
        Order {
            id,
            customer,
            items,
        }
    });
    let currencies = one_of(vec!["EUR", "USD", "JPY"]).unwrap();

    let mut suite = TestSuite::new("orders");

    fuzz(&mut suite, &orders, "item quantities stay in range", |order| {
        order.items.iter().all(|q| (1..=50).contains(q))
    });

    fuzz2(&mut suite, &orders, &currencies, "totals never overflow", |order, _| {
        let total: i64 = order.items.iter().sum();
        total >= 0 && order.customer.len() < 100
    });

    fuzz_explained(
        &mut suite,
        &int_range(0, 9).unwrap(),
        "order {} renders as one digit",
        |n| {
            let order = Order {
                id: n,
                customer: String::new(),
                items: Vec::new(),
            };
            order.id.to_string().len() == 1
        },
    );

    println!("Registered {} tests", suite.len());

    let report = suite.run();
    for result in report.results().iter().take(5) {
        println!("{}", result);
    }
    println!("{}", report);
}
