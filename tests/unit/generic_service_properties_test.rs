// Generic Service Property Tests
//
// CRUD invariants of GenericService over the in-memory repository.

use std::sync::Arc;

use contractdesk::core::Filter;
use contractdesk::coworkers::{Coworker, CreateCoworkerDto, UpdateCoworkerDto};
use contractdesk::modules::common::{GenericService, InMemoryRepository};
use proptest::prelude::*;

fn service() -> GenericService<Coworker> {
    GenericService::new(Arc::new(InMemoryRepository::<Coworker>::new()))
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,30}[A-Za-z]"
}

fn role_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec![
        "Designer".to_string(),
        "Engineer".to_string(),
        "Manager".to_string(),
    ]))
}

proptest! {
    #[test]
    fn prop_find_all_returns_every_created_record_newest_first(
        names in prop::collection::vec(name_strategy(), 0..12)
    ) {
        runtime().block_on(async {
            let service = service();
            let mut ids = Vec::new();
            for name in &names {
                let created = service
                    .create(&CreateCoworkerDto { name: name.clone(), email: None, role: None })
                    .await
                    .unwrap();
                ids.push(created.id);
            }

            let all = service.find_all().await.unwrap();
            let listed: Vec<String> = all.iter().map(|c| c.id.clone()).collect();
            ids.reverse();
            prop_assert_eq!(listed, ids);

            for pair in all.windows(2) {
                prop_assert!(pair[0].created_at >= pair[1].created_at);
            }
            Ok(())
        })?;
    }

    #[test]
    fn prop_created_record_is_found_by_id(name in name_strategy(), role in role_strategy()) {
        runtime().block_on(async {
            let service = service();
            let created = service
                .create(&CreateCoworkerDto { name: name.clone(), email: None, role: role.clone() })
                .await
                .unwrap();

            let found = service.find_one(&Filter::id(&created.id)).await.unwrap();
            prop_assert_eq!(&found, &created);
            prop_assert_eq!(found.name, name);
            prop_assert_eq!(found.role, role);
            Ok(())
        })?;
    }

    #[test]
    fn prop_partial_update_keeps_absent_fields(
        name in name_strategy(),
        role in role_strategy(),
        new_name in prop::option::of(name_strategy()),
    ) {
        runtime().block_on(async {
            let service = service();
            let created = service
                .create(&CreateCoworkerDto { name: name.clone(), email: None, role: role.clone() })
                .await
                .unwrap();

            let patch = UpdateCoworkerDto { name: new_name.clone(), ..Default::default() };
            let updated = service.update(&Filter::id(&created.id), &patch).await.unwrap();

            prop_assert_eq!(updated.name, new_name.unwrap_or(name));
            prop_assert_eq!(updated.role, role);
            prop_assert_eq!(updated.created_at, created.created_at);
            prop_assert!(updated.updated_at >= created.updated_at);
            Ok(())
        })?;
    }

    #[test]
    fn prop_deleted_record_is_gone(names in prop::collection::vec(name_strategy(), 1..8), pick in any::<prop::sample::Index>()) {
        runtime().block_on(async {
            let service = service();
            let mut created = Vec::new();
            for name in &names {
                created.push(
                    service
                        .create(&CreateCoworkerDto { name: name.clone(), email: None, role: None })
                        .await
                        .unwrap(),
                );
            }

            let victim = pick.get(&created).clone();
            let deleted = service.delete(&Filter::id(&victim.id)).await.unwrap();
            prop_assert_eq!(&deleted, &victim);

            let err = service.find_one(&Filter::id(&victim.id)).await.unwrap_err();
            prop_assert!(err.is_not_found());
            prop_assert_eq!(service.find_all().await.unwrap().len(), names.len() - 1);
            Ok(())
        })?;
    }

    #[test]
    fn prop_equality_filter_selects_exact_matches(
        roles in prop::collection::vec(role_strategy(), 0..12),
        wanted in prop::sample::select(vec!["Designer", "Engineer", "Manager"]),
    ) {
        runtime().block_on(async {
            let service = service();
            for (idx, role) in roles.iter().enumerate() {
                service
                    .create(&CreateCoworkerDto { name: format!("Person {}", idx), email: None, role: role.clone() })
                    .await
                    .unwrap();
            }

            let found = service
                .find_many(&Filter::all().eq("role", wanted))
                .await
                .unwrap();
            let expected = roles.iter().filter(|r| r.as_deref() == Some(wanted)).count();

            prop_assert_eq!(found.len(), expected);
            prop_assert!(found.iter().all(|c| c.role.as_deref() == Some(wanted)));
            Ok(())
        })?;
    }
}
