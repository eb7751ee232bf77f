use anyhow::Result;
use chrono::{Days, NaiveDate};
use contracts::domain::a001_customer::aggregate::{Customer, Sector};
use contracts::domain::a002_order::aggregate::{Category, Order};
use contracts::usecases::u501_generate_demo_data::request::GenerateRequest;
use rand::Rng;

/// Lower and upper bound of the random price multiplier
pub const PRICE_JITTER: (f64, f64) = (0.8, 1.2);

/// In-memory dataset, ready to be written to the store
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPlan {
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}

/// Growth factor applied to prices `day_offset` days into the window
pub fn growth_factor(day_offset: u32) -> f64 {
    1.0 + day_offset as f64 / 1000.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn pick<T: Copy, R: Rng>(rng: &mut R, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

/// Plan customers and orders for the `history_days` window ending at `today`.
///
/// Orders are dated from `today - history_days` up to the day before `today`.
pub fn plan_dataset<R: Rng>(
    request: &GenerateRequest,
    today: NaiveDate,
    rng: &mut R,
) -> Result<DatasetPlan> {
    if request.customer_count == 0 {
        anyhow::bail!("customer_count must be at least 1");
    }
    let customer_count = i32::try_from(request.customer_count)?;
    let window_start = today
        .checked_sub_days(Days::new(request.history_days.into()))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "history window of {} days is out of range",
                request.history_days
            )
        })?;

    let customers: Vec<Customer> = (1..=customer_count)
        .map(|index| Customer::synthetic(index, pick(rng, &Sector::ALL)))
        .collect();

    let mut orders = Vec::new();
    let mut date = window_start;
    for day_offset in 0..request.history_days {
        let orders_today = rng.gen_range(0..=request.max_orders_per_day);
        for _ in 0..orders_today {
            let customer_id = rng.gen_range(1..=customer_count);
            let category = pick(rng, &Category::ALL);
            let product = pick(rng, category.products());
            let multiplier = rng.gen_range(PRICE_JITTER.0..PRICE_JITTER.1);

            orders.push(Order {
                id: orders.len() as i32 + 1,
                customer_id,
                date,
                total: round2(product.base_price * multiplier * growth_factor(day_offset)),
                product: product.name.to_string(),
                category,
            });
        }
        date = date
            .succ_opt()
            .ok_or_else(|| anyhow::anyhow!("date overflow after {}", date))?;
    }

    Ok(DatasetPlan {
        customers,
        orders,
        window_start,
        window_end: today,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn plan(seed: u64) -> DatasetPlan {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        plan_dataset(&GenerateRequest::default(), today(), &mut rng).unwrap()
    }

    #[test]
    fn test_customers() {
        let plan = plan(1);
        assert_eq!(plan.customers.len(), 50);
        for (i, customer) in plan.customers.iter().enumerate() {
            assert_eq!(customer.id, i as i32 + 1);
            assert_eq!(
                customer.name,
                format!("Company {} {}", customer.sector, customer.id)
            );
        }
    }

    #[test]
    fn test_order_invariants() {
        let plan = plan(2);
        assert!(!plan.orders.is_empty());
        assert_eq!(plan.window_start, NaiveDate::from_ymd_opt(2023, 6, 16).unwrap());

        for order in &plan.orders {
            assert!((1..=50).contains(&order.customer_id));
            assert!(order.total > 0.0);
            assert!(order.date >= plan.window_start && order.date < plan.window_end);

            let template = order
                .category
                .products()
                .iter()
                .find(|p| p.name == order.product)
                .expect("product belongs to its category");
            let offset = (order.date - plan.window_start).num_days() as u32;
            let unscaled = order.total / growth_factor(offset);
            assert!(unscaled >= template.base_price * PRICE_JITTER.0 - 0.01);
            assert!(unscaled <= template.base_price * PRICE_JITTER.1 + 0.01);
            assert_eq!(round2(order.total), order.total);
        }
    }

    #[test]
    fn test_orders_per_day_bounded() {
        let plan = plan(3);
        let mut per_day = std::collections::BTreeMap::new();
        for order in &plan.orders {
            *per_day.entry(order.date).or_insert(0u32) += 1;
        }
        assert!(per_day.values().all(|n| *n <= 5));
        // ids are dense and unique
        for (i, order) in plan.orders.iter().enumerate() {
            assert_eq!(order.id, i as i32 + 1);
        }
    }

    #[test]
    fn test_seed_reproduces_dataset() {
        assert_eq!(plan(42), plan(42));
        assert_ne!(plan(42).orders, plan(43).orders);
    }

    #[test]
    fn test_zero_customers_is_rejected() {
        let request = GenerateRequest {
            customer_count: 0,
            ..GenerateRequest::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(plan_dataset(&request, today(), &mut rng).is_err());
    }
}
