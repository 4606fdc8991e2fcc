use proptest::prelude::*;
use server::model::EntryStatus;
use server::queue_manager::{QueueManager, QueueSettings};
use server::store::MemoryStateStore;
use std::collections::HashSet;
use std::sync::Arc;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn manager(minutes_per_position: u32) -> QueueManager {
    QueueManager::new(
        Arc::new(MemoryStateStore::new()),
        QueueSettings {
            minutes_per_position,
        },
    )
}

#[cfg(test)]
mod position_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_positions_are_contiguous_after_joins(
            names in prop::collection::vec("[a-zA-Z]{1,12}", 1..30),
            minutes in 1u32..60
        ) {
            let rt = runtime();
            rt.block_on(async {
                let manager = manager(minutes);

                for (i, name) in names.iter().enumerate() {
                    let receipt = manager.join(name.as_str(), "555", "haircut").await.unwrap();

                    // Property: the n-th join lands at position n with a linear ETA
                    prop_assert_eq!(receipt.position, i + 1);
                    prop_assert_eq!(receipt.eta, (i as u64 + 1) * u64::from(minutes));
                    prop_assert_eq!(receipt.token, format!("T{}", i + 1));
                }

                for i in 0..names.len() {
                    let status = manager.status(format!("T{}", i + 1)).await.unwrap();
                    prop_assert_eq!(status.position, i + 1);
                    prop_assert_eq!(status.status, EntryStatus::Waiting);
                }
                Ok(())
            })?;
        }

        #[test]
        fn test_leave_shifts_later_positions(
            count in 2usize..20,
            leave_index in 0usize..20
        ) {
            let leave_index = leave_index % count;
            let rt = runtime();
            rt.block_on(async {
                let manager = manager(2);
                for i in 0..count {
                    manager.join(format!("c{i}"), "555", "haircut").await.unwrap();
                }

                let leaving = format!("T{}", leave_index + 1);
                prop_assert!(manager.leave(leaving.as_str()).await.unwrap());

                // Property: everyone behind the leaver moves up one slot
                for i in 0..count {
                    let token = format!("T{}", i + 1);
                    let status = manager.status(token.as_str()).await;
                    if i == leave_index {
                        prop_assert!(status.is_err());
                    } else if i < leave_index {
                        prop_assert_eq!(status.unwrap().position, i + 1);
                    } else {
                        prop_assert_eq!(status.unwrap().position, i);
                    }
                }
                Ok(())
            })?;
        }

        #[test]
        fn test_tokens_never_repeat(
            ops in prop::collection::vec(0u8..4, 1..40)
        ) {
            let rt = runtime();
            rt.block_on(async {
                let manager = manager(2);
                let mut issued = HashSet::new();

                for op in ops {
                    let head = manager
                        .snapshot()
                        .await
                        .unwrap()
                        .waiting
                        .first()
                        .map(|entry| entry.token.clone());

                    match (op, head) {
                        (0, _) | (_, None) => {
                            let receipt = manager.join("x", "555", "haircut").await.unwrap();
                            // Property: a token is issued at most once
                            prop_assert!(issued.insert(receipt.token));
                        }
                        (1, Some(token)) => {
                            prop_assert!(manager.serve(token).await.unwrap().success);
                        }
                        (2, Some(token)) => {
                            prop_assert!(manager.leave(token).await.unwrap());
                        }
                        (_, Some(token)) => {
                            prop_assert!(manager.skip(token).await.unwrap().success);
                        }
                    }
                }

                // Property: skipped set only names waiting tokens marked skipped
                let snapshot = manager.snapshot().await.unwrap();
                for token in &snapshot.skipped {
                    let entry = snapshot.waiting.iter().find(|e| &e.token == token);
                    prop_assert!(entry.is_some());
                    prop_assert_eq!(entry.unwrap().status, EntryStatus::Skipped);
                }
                Ok(())
            })?;
        }
    }
}
