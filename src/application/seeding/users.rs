use std::sync::Arc;

use tracing::{error, info};

use super::DataSeeder;
use crate::domain::{DomainError, DomainResult, Store, User};

const SEED_PASSWORD: &str = "password@123";

/// The fixed bootstrap users.
pub fn seed_users() -> Vec<User> {
    vec![
        User::new("jperez", SEED_PASSWORD, "juan.perez@designli.co", "Juan", "Pérez"),
        User::new("mgarcia", SEED_PASSWORD, "maria.garcia@designli.co", "María", "García"),
        User::new(
            "crodriguez",
            SEED_PASSWORD,
            "carlos.rodriguez@designli.co",
            "Carlos",
            "Rodríguez",
        ),
    ]
}

/// Seeds the user store. Running it twice appends the records again.
pub struct UserSeeder {
    store: Arc<dyn Store<User>>,
    users: Vec<User>,
}

impl UserSeeder {
    pub fn new(store: Arc<dyn Store<User>>) -> Self {
        Self::with_users(store, seed_users())
    }

    pub fn with_users(store: Arc<dyn Store<User>>, users: Vec<User>) -> Self {
        Self { store, users }
    }
}

fn check_record(user: &User) -> DomainResult<()> {
    if user.username.trim().is_empty() {
        return Err(DomainError::SeedingFailed("seed user without username".into()));
    }
    if user.password.is_empty() {
        return Err(DomainError::SeedingFailed(format!(
            "seed user '{}' has an empty password",
            user.username
        )));
    }
    if !user.email.contains('@') {
        return Err(DomainError::SeedingFailed(format!(
            "seed user '{}' has an invalid email '{}'",
            user.username, user.email
        )));
    }
    Ok(())
}

impl DataSeeder for UserSeeder {
    fn seed(&self) -> DomainResult<usize> {
        info!("Seeding {} users", self.users.len());

        if self.users.is_empty() {
            error!("User seed list is empty");
            return Err(DomainError::SeedingFailed("no seed users defined".into()));
        }
        if let Err(e) = self.users.iter().try_for_each(check_record) {
            error!("User seeding aborted: {}", e);
            return Err(e);
        }

        let ids = self.store.add_range(self.users.clone());
        if ids.is_empty() {
            error!("User store has no identities left for {} seed users", self.users.len());
            return Err(DomainError::SeedingFailed(format!(
                "store rejected the batch of {} seed users",
                self.users.len()
            )));
        }

        info!(
            first_id = ids.first().copied(),
            last_id = ids.last().copied(),
            "Seeded {} users",
            ids.len()
        );
        Ok(ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryStore;

    fn store() -> Arc<dyn Store<User>> {
        Arc::new(InMemoryStore::new())
    }

    #[test]
    fn seeds_three_users_in_order() {
        let store = store();
        assert_eq!(UserSeeder::new(store.clone()).seed().unwrap(), 3);

        let users = store.get_all();
        let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["jperez", "mgarcia", "crodriguez"]);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[2].id, 3);
        assert_eq!(users[1].last_name, "García");
    }

    #[test]
    fn fresh_stores_each_get_three() {
        for _ in 0..2 {
            let store = store();
            UserSeeder::new(store.clone()).seed().unwrap();
            assert_eq!(store.count(), 3);
        }
    }

    #[test]
    fn reseeding_appends_without_dedup() {
        let store = store();
        let seeder = UserSeeder::new(store.clone());
        seeder.seed().unwrap();
        seeder.seed().unwrap();

        assert_eq!(store.count(), 6);
        let ids: Vec<_> = store.get_all().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(store.get_by_id(4).unwrap().username, "jperez");
    }

    #[test]
    fn invalid_record_fails_without_partial_insert() {
        let store = store();
        let mut users = seed_users();
        users[1].email = "not-an-email".into();

        let err = UserSeeder::with_users(store.clone(), users).seed().unwrap_err();
        assert!(matches!(err, DomainError::SeedingFailed(_)));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn empty_seed_list_fails() {
        let err = UserSeeder::with_users(store(), Vec::new()).seed().unwrap_err();
        assert!(matches!(err, DomainError::SeedingFailed(_)));
    }

    #[test]
    fn store_without_room_fails_seeding() {
        let store: Arc<dyn Store<User>> = Arc::new(InMemoryStore::with_next_id(i32::MAX - 1));

        let err = UserSeeder::new(store.clone()).seed().unwrap_err();
        assert!(matches!(err, DomainError::SeedingFailed(_)));
        assert_eq!(store.count(), 0);
    }
}
