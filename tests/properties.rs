//! Property checks over the domain invariants that hold for any input.

use std::sync::Arc;

use proptest::prelude::*;

use trailfit::adapters::memory::InMemoryRepository;
use trailfit::domain::foundation::{
    Coordinates, Distance, Email, HrmId, PlayerId, Repository, ShelterId, Timestamp, WorkoutId,
};
use trailfit::domain::telemetry::{HeartRateSample, ShelterStatus};
use trailfit::domain::trail::{nearest_open_shelter, Shelter, Trail};
use trailfit::domain::workout::{Workout, WorkoutKind};

fn coordinates() -> impl Strategy<Value = Coordinates> {
    (-89.0f64..89.0, -179.0f64..179.0).prop_map(|(lat, lon)| Coordinates::new(lat, lon).unwrap())
}

proptest! {
    #[test]
    fn simple_addresses_parse(local in "[a-z][a-z0-9._]{0,20}[a-z0-9]", domain in "[a-z]{1,12}\\.[a-z]{2,6}") {
        prop_assume!(!local.contains(".."));
        let address = format!("{}@{}", local, domain);
        let email = Email::parse(&address).unwrap();
        prop_assert_eq!(email.as_str(), address.as_str());
    }

    #[test]
    fn strings_without_at_sign_never_parse(input in "[^@]{0,40}") {
        prop_assert!(Email::parse(&input).is_err());
    }

    #[test]
    fn availability_only_without_candidate_or_distance(meters in 0.0f64..50_000.0, nil in any::<bool>()) {
        let candidate = if nil { ShelterId::nil() } else { ShelterId::new() };
        let reachable = ShelterStatus::derive(WorkoutId::new(), Some(candidate), Distance::from_meters(meters), None);
        prop_assert_eq!(reachable.available, nil);

        let unreachable = ShelterStatus::derive(WorkoutId::new(), Some(candidate), Distance::UNREACHABLE, None);
        prop_assert!(unreachable.available);

        let absent = ShelterStatus::derive(WorkoutId::new(), None, Distance::from_meters(meters), None);
        prop_assert!(absent.available);
    }

    #[test]
    fn nearest_shelter_is_open_and_minimal(
        from in coordinates(),
        shelters in prop::collection::vec((coordinates(), any::<bool>()), 0..8),
    ) {
        let trail = Trail::new(
            "t",
            shelters
                .iter()
                .enumerate()
                .map(|(i, (at, open))| Shelter::new(format!("s{}", i), *at, *open).unwrap())
                .collect(),
        )
        .unwrap();
        let trails = [trail];

        match nearest_open_shelter(&trails, &from) {
            Some((shelter, distance)) => {
                prop_assert!(shelter.is_open());
                for (at, open) in &shelters {
                    if *open {
                        prop_assert!(distance.meters() <= from.distance_to(at).meters() + 1e-6);
                    }
                }
            }
            None => prop_assert!(shelters.iter().all(|(_, open)| !open)),
        }
    }

    #[test]
    fn distance_is_symmetric_and_non_negative(a in coordinates(), b in coordinates()) {
        let ab = a.distance_to(&b).meters();
        let ba = b.distance_to(&a).meters();
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-6);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn concurrent_updates_are_not_lost(writers in 1usize..16) {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .build()
            .unwrap();

        let total = runtime.block_on(async move {
            let repo = Arc::new(InMemoryRepository::<Workout>::new());
            let workout = Workout::new(PlayerId::new(), None, false, WorkoutKind::Cardio).unwrap();
            let id = workout.id();
            repo.add(&workout).await.unwrap();

            let tasks: Vec<_> = (0..writers)
                .map(|i| {
                    let repo = repo.clone();
                    let sample = HeartRateSample::new(
                        id,
                        HrmId::new(),
                        100,
                        Timestamp::from_unix_millis(1_000 * (i as i64 + 1)),
                    );
                    tokio::spawn(async move {
                        repo.update_with(
                            id,
                            Box::new(move |w: &mut Workout| Ok(w.record_heart_rate(&sample)?.is_applied())),
                        )
                        .await
                        .unwrap();
                    })
                })
                .collect();
            for task in tasks {
                task.await.unwrap();
            }
            repo.get(id).await.unwrap().telemetry().heart_rate().count() as usize
        });

        prop_assert_eq!(total, writers);
    }
}
