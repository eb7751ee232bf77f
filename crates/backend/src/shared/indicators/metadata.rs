use contracts::shared::indicators::*;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub fn sales_revenue() -> IndicatorId {
        IndicatorId::new("sales_revenue")
    }
    pub fn sales_order_count() -> IndicatorId {
        IndicatorId::new("sales_order_count")
    }
    pub fn sales_avg_check() -> IndicatorId {
        IndicatorId::new("sales_avg_check")
    }
}

fn money() -> ValueFormat {
    ValueFormat::Money {
        currency: "$".into(),
    }
}

/// Build the full catalogue of indicators + sets.
pub fn build_catalog() -> IndicatorCatalogResponse {
    let indicators = vec![
        IndicatorMeta {
            id: ids::sales_revenue(),
            label: "Revenue".into(),
            short_label: None,
            icon: "dollar-sign".into(),
            format: money(),
            description: Some("Sum of order totals in the period".into()),
        },
        IndicatorMeta {
            id: ids::sales_order_count(),
            label: "Orders".into(),
            short_label: None,
            icon: "orders".into(),
            format: ValueFormat::Integer,
            description: Some("Number of orders in the period".into()),
        },
        IndicatorMeta {
            id: ids::sales_avg_check(),
            label: "Average ticket".into(),
            short_label: Some("Avg. ticket".into()),
            icon: "invoices".into(),
            format: money(),
            description: Some("Revenue / Orders".into()),
        },
    ];

    let sets = vec![IndicatorSetMeta {
        id: IndicatorSetId::new("sales_overview"),
        label: "Sales overview".into(),
        indicators: vec![
            ids::sales_revenue(),
            ids::sales_order_count(),
            ids::sales_avg_check(),
        ],
        columns: 3,
    }];

    IndicatorCatalogResponse { indicators, sets }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_set_member_is_in_the_catalog() {
        let catalog = build_catalog();
        for set in &catalog.sets {
            assert_eq!(set.indicators.len(), set.columns as usize);
            for id in &set.indicators {
                assert!(catalog.indicators.iter().any(|m| &m.id == id));
            }
        }
    }
}
