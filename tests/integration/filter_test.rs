use rand::SeedableRng;
use rand::rngs::StdRng;
use sales_dashboard::schema::{PRODUCT_CATEGORY, REGION};
use sales_dashboard::{FilterOutcome, Selection, apply_selection};

use crate::utils::{random_fixture, random_subset, scenario_fixture};

#[test]
fn test_region_filter_keeps_matching_rows() -> sales_dashboard::Result<()> {
    let table = scenario_fixture().load()?;

    let east = apply_selection(&table, &Selection::new(["East"], ["Tools"]))?;
    let rows = east.into_rows().expect("East matches one row");
    let records = rows.records()?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].product_id, "P1");
    assert_eq!(records, table.records()?[..1].to_vec());
    Ok(())
}

#[test]
fn test_unknown_region_is_empty() -> sales_dashboard::Result<()> {
    let table = scenario_fixture().load()?;
    let outcome = apply_selection(&table, &Selection::new(["North"], ["Tools"]))?;
    assert!(outcome.is_empty());
    Ok(())
}

#[test]
fn test_empty_selection_matches_nothing() -> sales_dashboard::Result<()> {
    let table = scenario_fixture().load()?;
    let no_regions = Selection::new(Vec::<String>::new(), ["Tools"]);
    assert!(apply_selection(&table, &no_regions)?.is_empty());
    Ok(())
}

#[test]
fn test_default_selection_is_identity() -> sales_dashboard::Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    let table = random_fixture(&mut rng, 200).load()?;

    let selection = Selection::all(&table)?;
    let FilterOutcome::Rows(filtered) = apply_selection(&table, &selection)? else {
        panic!("full selection returned no rows");
    };
    assert_eq!(filtered.batch(), table.batch());
    assert_eq!(filtered.records()?, table.records()?);
    Ok(())
}

#[test]
fn test_random_selections_only_keep_selected_rows() -> sales_dashboard::Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let table = random_fixture(&mut rng, 300).load()?;
    let all = Selection::all(&table)?;

    for _ in 0..50 {
        let selection = Selection {
            regions: random_subset(&mut rng, &all.regions),
            categories: random_subset(&mut rng, &all.categories),
        };
        let expected = table
            .records()?
            .into_iter()
            .filter(|r| {
                selection.regions.contains(&r.region)
                    && selection.categories.contains(&r.product_category)
            })
            .collect::<Vec<_>>();

        match apply_selection(&table, &selection)? {
            FilterOutcome::Empty => assert!(expected.is_empty()),
            FilterOutcome::Rows(filtered) => {
                assert!(filtered.num_rows() <= table.num_rows());
                assert_eq!(filtered.records()?, expected);

                let regions = filtered.distinct_values(REGION)?;
                let categories = filtered.distinct_values(PRODUCT_CATEGORY)?;
                assert!(regions.iter().all(|r| selection.regions.contains(r)));
                assert!(categories.iter().all(|c| selection.categories.contains(c)));
            }
        }
    }
    Ok(())
}

#[test]
fn test_filter_options_in_first_seen_order() -> sales_dashboard::Result<()> {
    let table = scenario_fixture().load()?;
    let all = Selection::all(&table)?;
    assert_eq!(all.regions, vec!["East", "West"]);
    assert_eq!(all.categories, vec!["Tools"]);
    Ok(())
}
