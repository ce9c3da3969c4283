use chrono::NaiveDate;
use invoice_dashboard::dashboard::{
    aggregate, facet_values, filter, result_companies, total_pages, AmountRange, DashboardState,
    DateRange, Facet, InvoiceRecord, Paginator, PredicateSet, Stats, PAGE_SIZE,
};

fn record(number: &str, issuer: &str, receiver: &str, product: &str, amount: Option<f64>) -> InvoiceRecord {
    InvoiceRecord {
        invoice_number: number.to_string(),
        issuing_company: issuer.to_string(),
        receiving_company: receiver.to_string(),
        timestamp: "2024-01-15 10:00:00".to_string(),
        product_name: product.to_string(),
        specification: None,
        quantity: 1,
        total_amount: amount,
    }
}

fn dated(number: &str, timestamp: &str) -> InvoiceRecord {
    InvoiceRecord {
        timestamp: timestamp.to_string(),
        ..record(number, "Acme", "Globex", "Widget", Some(10.0))
    }
}

fn numbered(count: usize) -> Vec<InvoiceRecord> {
    (1..=count)
        .map(|i| record(&format!("INV-{i:03}"), "Acme", "Globex", "Widget", Some(i as f64)))
        .collect()
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn numbers(view: &[&InvoiceRecord]) -> Vec<String> {
    view.iter().map(|r| r.invoice_number.clone()).collect()
}

fn sample() -> Vec<InvoiceRecord> {
    vec![
        record("INV-001", "abcCorp", "Globex", "Widget", Some(100.0)),
        record("INV-002", "Initech", "xyz", "Gadget", Some(200.0)),
        record("INV-003", "abcCorp", "Initech", "Gizmo", Some(300.0)),
        record("ABC-004", "Umbrella", "Globex", "Widget", None),
    ]
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

#[test]
fn empty_predicates_return_everything_in_order() {
    let records = sample();
    let view = filter(&records, &PredicateSet::default());
    assert_eq!(view.len(), records.len());
    for (kept, original) in view.iter().zip(records.iter()) {
        assert_eq!(*kept, original);
    }
}

#[test]
fn blank_slots_are_inactive() {
    let records = sample();
    let predicates = PredicateSet {
        keyword: "   ".to_string(),
        product: " ".to_string(),
        ..PredicateSet::default()
    };
    assert!(predicates.is_empty());
    assert_eq!(filter(&records, &predicates).len(), records.len());
}

#[test]
fn keyword_is_case_insensitive_substring() {
    let records = vec![
        record("1", "abcCorp", "Globex", "Widget", Some(1.0)),
        record("2", "Initech", "xyz", "Gadget", Some(1.0)),
    ];
    let predicates = PredicateSet {
        keyword: "ABC".to_string(),
        ..PredicateSet::default()
    };
    assert_eq!(numbers(&filter(&records, &predicates)), vec!["1"]);
}

#[test]
fn keyword_searches_number_receiver_and_product() {
    let records = sample();
    let by = |keyword: &str| {
        let predicates = PredicateSet {
            keyword: keyword.to_string(),
            ..PredicateSet::default()
        };
        numbers(&filter(&records, &predicates))
    };

    assert_eq!(by("abc"), vec!["INV-001", "INV-003", "ABC-004"]);
    assert_eq!(by("XYZ"), vec!["INV-002"]);
    assert_eq!(by("gizmo"), vec!["INV-003"]);
    assert_eq!(by("inv-00"), vec!["INV-001", "INV-002", "INV-003"]);
    assert!(by("nothing-like-this").is_empty());
}

#[test]
fn empty_fields_do_not_block_other_matches() {
    let records = vec![record("", "", "", "Sprocket", Some(1.0))];
    let predicates = PredicateSet {
        keyword: "sprock".to_string(),
        ..PredicateSet::default()
    };
    assert_eq!(filter(&records, &predicates).len(), 1);
}

#[test]
fn exact_match_filters_are_case_sensitive_and_combine() {
    let records = sample();

    let predicates = PredicateSet {
        issuing_company: "abcCorp".to_string(),
        ..PredicateSet::default()
    };
    assert_eq!(numbers(&filter(&records, &predicates)), vec!["INV-001", "INV-003"]);

    let predicates = PredicateSet {
        issuing_company: "abccorp".to_string(),
        ..PredicateSet::default()
    };
    assert!(filter(&records, &predicates).is_empty());

    let predicates = PredicateSet {
        issuing_company: "abcCorp".to_string(),
        product: "Widget".to_string(),
        ..PredicateSet::default()
    };
    assert_eq!(numbers(&filter(&records, &predicates)), vec!["INV-001"]);

    let predicates = PredicateSet {
        receiving_company: "Globex".to_string(),
        keyword: "umbrella".to_string(),
        ..PredicateSet::default()
    };
    assert_eq!(numbers(&filter(&records, &predicates)), vec!["ABC-004"]);
}

#[test]
fn date_range_end_is_inclusive_through_end_of_day() {
    let records = vec![
        dated("dec", "2023-12-31T23:59:59"),
        dated("start", "2024-01-01T00:00"),
        dated("late", "2024-01-31T23:00"),
        dated("next", "2024-02-01T00:00"),
    ];
    let predicates = PredicateSet {
        date_range: DateRange {
            start: date(2024, 1, 1),
            end: date(2024, 1, 31),
        },
        ..PredicateSet::default()
    };
    assert_eq!(numbers(&filter(&records, &predicates)), vec!["start", "late"]);
}

#[test]
fn date_range_with_single_bound() {
    let records = vec![
        dated("a", "2024-01-10"),
        dated("b", "2024-03-10 08:30:00"),
    ];

    let from_feb = PredicateSet {
        date_range: DateRange {
            start: date(2024, 2, 1),
            end: None,
        },
        ..PredicateSet::default()
    };
    assert_eq!(numbers(&filter(&records, &from_feb)), vec!["b"]);

    let until_jan = PredicateSet {
        date_range: DateRange {
            start: None,
            end: date(2024, 1, 10),
        },
        ..PredicateSet::default()
    };
    assert_eq!(numbers(&filter(&records, &until_jan)), vec!["a"]);
}

#[test]
fn unparseable_timestamps_drop_only_under_date_filter() {
    let records = vec![dated("good", "2024-01-15"), dated("bad", "not a date")];

    assert_eq!(filter(&records, &PredicateSet::default()).len(), 2);

    let predicates = PredicateSet {
        date_range: DateRange {
            start: date(2000, 1, 1),
            end: None,
        },
        ..PredicateSet::default()
    };
    assert_eq!(numbers(&filter(&records, &predicates)), vec!["good"]);
}

#[test]
fn amount_range_is_inclusive_with_defaults() {
    let records = vec![
        record("neg", "A", "B", "P", Some(-5.0)),
        record("zero", "A", "B", "P", Some(0.0)),
        record("mid", "A", "B", "P", Some(150.0)),
        record("high", "A", "B", "P", Some(1000.0)),
        record("none", "A", "B", "P", None),
    ];

    let between = PredicateSet {
        amount_range: AmountRange {
            min: Some(150.0),
            max: Some(1000.0),
        },
        ..PredicateSet::default()
    };
    assert_eq!(numbers(&filter(&records, &between)), vec!["mid", "high"]);

    // Unset min counts as 0, so negative amounts fall outside
    let max_only = PredicateSet {
        amount_range: AmountRange {
            min: None,
            max: Some(150.0),
        },
        ..PredicateSet::default()
    };
    assert_eq!(numbers(&filter(&records, &max_only)), vec!["zero", "mid"]);

    let min_only = PredicateSet {
        amount_range: AmountRange {
            min: Some(1.0),
            max: None,
        },
        ..PredicateSet::default()
    };
    assert_eq!(numbers(&filter(&records, &min_only)), vec!["mid", "high"]);
}

#[test]
fn invalid_amounts_survive_without_amount_filter() {
    let records = vec![
        record("nan", "A", "B", "P", Some(f64::NAN)),
        record("none", "A", "B", "P", None),
    ];
    assert_eq!(filter(&records, &PredicateSet::default()).len(), 2);

    let predicates = PredicateSet {
        amount_range: AmountRange {
            min: Some(0.0),
            max: None,
        },
        ..PredicateSet::default()
    };
    assert!(filter(&records, &predicates).is_empty());
}

#[test]
fn padded_suggestion_selects_its_own_records() {
    let records = vec![
        record("1", " Acme", "Globex", "Widget", Some(1.0)),
        record("2", "Acme", "Globex", "Widget", Some(2.0)),
    ];
    let suggestions = facet_values(&records, Facet::Issuer);
    assert_eq!(suggestions, vec![" Acme", "Acme"]);

    let mut state = DashboardState::new(records);
    for (suggestion, expected) in suggestions.iter().zip(["1", "2"]) {
        state.set_issuing_company(suggestion.clone());
        assert_eq!(numbers(&state.filtered()), vec![expected]);
    }
}

#[test]
fn keyword_is_matched_as_typed() {
    let records = vec![
        record("1", " Acme", "Globex", "Widget", Some(1.0)),
        record("2", "Acme", "Globex", "Widget", Some(2.0)),
    ];
    let mut state = DashboardState::new(records);

    state.set_keyword(" acme");
    assert_eq!(numbers(&state.filtered()), vec!["1"]);

    state.set_keyword("acme");
    assert_eq!(numbers(&state.filtered()), vec!["1", "2"]);

    state.set_keyword("   ");
    assert_eq!(state.filtered().len(), 2);
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

#[test]
fn aggregate_of_empty_view_is_zero() {
    let stats = aggregate(&[]);
    assert_eq!(stats, Stats::default());
    assert_eq!(stats.count, 0);
    assert_eq!(stats.total_amount, 0.0);
    assert_eq!(stats.distinct_company_count, 0);
    assert_eq!(stats.distinct_product_count, 0);
}

#[test]
fn aggregate_skips_invalid_amounts() {
    let records = vec![
        record("1", "Acme", "X", "Widget", Some(100.0)),
        record("2", "Acme", "X", "Gadget", Some(200.0)),
        record("3", "Initech", "X", "Widget", Some(f64::NAN)),
        record("4", "Globex", "X", "Widget", Some(300.0)),
    ];
    let view: Vec<&InvoiceRecord> = records.iter().collect();
    let stats = aggregate(&view);

    assert_eq!(stats.count, 4);
    assert_eq!(stats.total_amount, 600.0);
    assert_eq!(stats.average_amount, 200.0);
    assert_eq!(stats.max_amount, 300.0);
    assert_eq!(stats.min_amount, 100.0);
    // Distinct counts include the record with the invalid amount
    assert_eq!(stats.distinct_company_count, 3);
    assert_eq!(stats.distinct_product_count, 2);
}

#[test]
fn aggregate_without_any_valid_amount_is_zero_including_count() {
    let records = vec![
        record("1", "Acme", "X", "Widget", None),
        record("2", "Initech", "X", "Gadget", Some(f64::NAN)),
    ];
    let view: Vec<&InvoiceRecord> = records.iter().collect();
    assert_eq!(aggregate(&view), Stats::default());
}

#[test]
fn aggregate_handles_negative_amounts() {
    let records = vec![
        record("1", "Acme", "X", "Widget", Some(-50.0)),
        record("2", "Acme", "X", "Widget", Some(-10.0)),
    ];
    let view: Vec<&InvoiceRecord> = records.iter().collect();
    let stats = aggregate(&view);
    assert_eq!(stats.max_amount, -10.0);
    assert_eq!(stats.min_amount, -50.0);
    assert_eq!(stats.average_amount, -30.0);
}

// ---------------------------------------------------------------------------
// Paginator
// ---------------------------------------------------------------------------

#[test]
fn total_pages_rounds_up() {
    assert_eq!(total_pages(0), 0);
    assert_eq!(total_pages(1), 1);
    assert_eq!(total_pages(PAGE_SIZE), 1);
    assert_eq!(total_pages(PAGE_SIZE + 1), 2);
    assert_eq!(total_pages(25), 3);
}

#[test]
fn last_page_holds_the_remainder() {
    let records = numbered(25);
    let mut paginator = Paginator::new();
    let pages = total_pages(records.len());

    assert_eq!(paginator.page(&records).len(), 10);
    assert!(paginator.go_to_page(3, pages));
    let page = paginator.page(&records);
    assert_eq!(page.len(), 5);
    assert_eq!(page[0].invoice_number, "INV-021");
    assert_eq!(page[4].invoice_number, "INV-025");
}

#[test]
fn out_of_range_navigation_is_a_no_op() {
    let pages = total_pages(25);
    let mut paginator = Paginator::new();
    assert!(paginator.go_to_page(2, pages));

    assert!(!paginator.go_to_page(0, pages));
    assert_eq!(paginator.current_page(), 2);
    assert!(!paginator.go_to_page(pages + 1, pages));
    assert_eq!(paginator.current_page(), 2);
}

#[test]
fn first_previous_next_last() {
    let pages = 3;
    let mut paginator = Paginator::new();

    assert!(!paginator.previous(pages));
    assert_eq!(paginator.current_page(), 1);

    assert!(paginator.next(pages));
    assert!(paginator.next(pages));
    assert_eq!(paginator.current_page(), 3);
    assert!(!paginator.next(pages));
    assert_eq!(paginator.current_page(), 3);

    assert!(paginator.first(pages));
    assert_eq!(paginator.current_page(), 1);
    assert!(paginator.last(pages));
    assert_eq!(paginator.current_page(), 3);
    assert!(paginator.previous(pages));
    assert_eq!(paginator.current_page(), 2);
}

#[test]
fn empty_view_has_no_pages_to_visit() {
    let mut paginator = Paginator::new();
    assert!(!paginator.last(0));
    assert!(!paginator.go_to_page(1, 0));
    assert_eq!(paginator.current_page(), 1);
    assert!(paginator.page::<InvoiceRecord>(&[]).is_empty());
}

// ---------------------------------------------------------------------------
// Facets
// ---------------------------------------------------------------------------

#[test]
fn facets_are_sorted_distinct_and_non_empty() {
    let records = vec![
        record("1", "Zeta", "Globex", "Widget", Some(1.0)),
        record("2", "Acme", "", "Gadget", Some(1.0)),
        record("3", "Zeta", "Globex", "", Some(1.0)),
        record("4", "acme", "Initech", "Widget", Some(1.0)),
    ];

    assert_eq!(facet_values(&records, Facet::Issuer), vec!["Acme", "Zeta", "acme"]);
    assert_eq!(facet_values(&records, Facet::Receiver), vec!["Globex", "Initech"]);
    assert_eq!(facet_values(&records, Facet::Product), vec!["Gadget", "Widget"]);
}

#[test]
fn result_companies_follow_the_filtered_view() {
    let records = sample();
    let predicates = PredicateSet {
        product: "Widget".to_string(),
        ..PredicateSet::default()
    };
    let view = filter(&records, &predicates);
    assert_eq!(result_companies(&view), vec!["Umbrella", "abcCorp"]);
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

#[test]
fn changing_any_filter_resets_the_page() {
    let mut state = DashboardState::new(numbered(45));
    assert!(state.go_to_page(3));
    assert_eq!(state.current_page(), 3);

    // Still 45 matches, so page 3 would remain valid, but the cursor resets anyway
    state.set_keyword("inv");
    assert_eq!(state.current_page(), 1);

    assert!(state.last_page());
    state.set_product("Widget");
    assert_eq!(state.current_page(), 1);

    assert!(state.next_page());
    state.set_issuing_company("Acme");
    assert_eq!(state.current_page(), 1);

    assert!(state.next_page());
    state.set_receiving_company("Globex");
    assert_eq!(state.current_page(), 1);

    assert!(state.next_page());
    state.set_date_range(date(2024, 1, 1), None);
    assert_eq!(state.current_page(), 1);

    assert!(state.next_page());
    state.set_amount_range(None, Some(1000.0));
    assert_eq!(state.current_page(), 1);

    assert!(state.next_page());
    state.clear_filters();
    assert_eq!(state.current_page(), 1);
}

#[test]
fn state_derives_views_from_store_and_predicates() {
    let mut state = DashboardState::new(numbered(25));
    assert_eq!(state.total_pages(), 3);
    assert!(state.last_page());
    assert_eq!(state.page_records().len(), 5);

    state.set_amount_range(Some(11.0), Some(20.0));
    assert_eq!(state.filtered().len(), 10);
    assert_eq!(state.total_pages(), 1);
    assert_eq!(state.page_records()[0].invoice_number, "INV-011");

    let stats = state.stats();
    assert_eq!(stats.count, 10);
    assert_eq!(stats.total_amount, (11..=20).sum::<i32>() as f64);
    assert_eq!(state.result_companies(), vec!["Acme"]);
    // Facets ignore the active filters
    assert_eq!(state.facet(Facet::Issuer), vec!["Acme"]);
}

#[test]
fn empty_store_renders_zero_state() {
    let mut state = DashboardState::default();
    state.set_keyword("anything");
    assert!(state.filtered().is_empty());
    assert_eq!(state.total_pages(), 0);
    assert!(state.page_records().is_empty());
    assert_eq!(state.stats(), Stats::default());
    assert!(!state.next_page());
    assert!(state.facet(Facet::Product).is_empty());
}

#[test]
fn state_navigation_stays_within_bounds() {
    let mut state = DashboardState::new(numbered(25));

    assert!(!state.previous_page());
    assert_eq!(state.current_page(), 1);

    assert!(state.last_page());
    assert!(state.previous_page());
    assert_eq!(state.current_page(), 2);
    assert_eq!(state.page_records()[0].invoice_number, "INV-011");

    assert!(state.previous_page());
    assert!(!state.previous_page());
    assert_eq!(state.current_page(), 1);

    assert!(state.next_page());
    assert!(state.first_page());
    assert_eq!(state.current_page(), 1);
    assert!(!state.go_to_page(4));
    assert_eq!(state.current_page(), 1);
}

#[test]
fn reloading_the_store_resets_the_page() {
    let mut state = DashboardState::new(numbered(30));
    assert!(state.go_to_page(2));
    state.load(numbered(12));
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.total_pages(), 2);
}
