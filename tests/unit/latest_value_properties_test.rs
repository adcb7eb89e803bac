// Latest Value Property Tests
//
// Whatever order values are recorded in, the latest value is the one with
// the greatest recorded_at and the history is listed newest first.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use contractdesk::contracts::models::contract_value::latest;
use contractdesk::contracts::models::{
    ContractStatus, ContractValue, CreateContractDto, NewContractValue,
};
use contractdesk::contracts::{
    ContractRepository, ContractService, InMemoryContractRepository, PdfRenderer,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

/// (amount in cents, minutes after the base time); minutes are distinct
fn history_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::btree_set(0i64..100_000, 1..20)
        .prop_flat_map(|minutes| {
            let minutes: Vec<i64> = minutes.into_iter().collect();
            let len = minutes.len();
            (
                prop::collection::vec(0i64..10_000_000, len),
                Just(minutes).prop_shuffle(),
            )
        })
        .prop_map(|(amounts, minutes)| amounts.into_iter().zip(minutes).collect())
}

fn create_dto(initial: &(i64, i64)) -> CreateContractDto {
    CreateContractDto {
        title: "Property".to_string(),
        description: None,
        coworker_id: None,
        status: ContractStatus::Active,
        initial_value: Decimal::new(initial.0, 2),
        value_recorded_at: Some(base_time() + Duration::minutes(initial.1)),
    }
}

proptest! {
    #[test]
    fn prop_latest_picks_greatest_recorded_at(history in history_strategy()) {
        let values: Vec<ContractValue> = history
            .iter()
            .enumerate()
            .map(|(idx, (cents, minutes))| ContractValue {
                id: idx.to_string(),
                contract_id: "c-1".to_string(),
                amount: Decimal::new(*cents, 2),
                recorded_at: base_time() + Duration::minutes(*minutes),
            })
            .collect();

        let newest = latest(&values).unwrap();
        let max_minutes = history.iter().map(|(_, m)| *m).max().unwrap();
        prop_assert_eq!(newest.recorded_at, base_time() + Duration::minutes(max_minutes));
    }

    #[test]
    fn prop_repository_history_is_newest_first(history in history_strategy()) {
        runtime().block_on(async {
            let repo = InMemoryContractRepository::new();
            let (contract, _) = repo.create_with_initial_value(&create_dto(&history[0])).await.unwrap();

            for (cents, minutes) in &history[1..] {
                let value = NewContractValue::new(
                    Decimal::new(*cents, 2),
                    Some(base_time() + Duration::minutes(*minutes)),
                );
                repo.add_value(&contract.id, &value).await.unwrap();
            }

            let listed = repo.list_values(&contract.id).await.unwrap();
            prop_assert_eq!(listed.len(), history.len());
            for pair in listed.windows(2) {
                prop_assert!(pair[0].recorded_at > pair[1].recorded_at);
            }

            let single = repo.latest_value(&contract.id).await.unwrap().unwrap();
            let all = repo.latest_values().await.unwrap();
            prop_assert_eq!(&single, &listed[0]);
            prop_assert_eq!(&all[&contract.id], &listed[0]);
            Ok(())
        })?;
    }

    #[test]
    fn prop_service_reads_agree_on_latest_value(history in history_strategy()) {
        runtime().block_on(async {
            let service = ContractService::new(
                Arc::new(InMemoryContractRepository::new()),
                Arc::new(PdfRenderer::new()),
            );
            let created = service.create_with_initial_value(&create_dto(&history[0])).await.unwrap();

            for (cents, minutes) in &history[1..] {
                let value = NewContractValue::new(
                    Decimal::new(*cents, 2),
                    Some(base_time() + Duration::minutes(*minutes)),
                );
                service.add_value(&created.id, &value).await.unwrap();
            }

            let (expected_cents, _) = history.iter().max_by_key(|(_, m)| *m).unwrap();
            let expected = Decimal::new(*expected_cents, 2);

            let one = service.find_contract_with_latest_value(&created.id).await.unwrap();
            prop_assert_eq!(one.latest_value.unwrap().amount, expected);

            let all = service.find_all_contracts_with_latest_value().await.unwrap();
            prop_assert_eq!(all.len(), 1);
            prop_assert_eq!(all[0].latest_value.as_ref().unwrap().amount, expected);
            Ok(())
        })?;
    }
}
