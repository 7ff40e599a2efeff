//! Random test data.
//!
//! Every generator has a `_with` variant taking the random source, so
//! tests can pin a seed.

use rand::{Rng, distr::Alphanumeric, seq::IndexedRandom};
use restcheck_domain::models::{
    Address, Dlc, FullUser, Game, Geolocation, Name, Requirements, SimilarDlc, StoreUser,
};

const GENRES: &[&str] = &["Action", "Adventure", "Puzzle", "Strategy", "Shooter"];
const COMPANIES: &[&str] = &["Valve", "Bethesda", "CD Projekt", "Ubisoft"];
const TAGS: &[&str] = &["Shooter", "Singleplayer", "Multiplayer", "Indie", "Retro"];

/// Login prefix shared by generated users.
pub const LOGIN_PREFIX: &str = "restcheck_";

/// A random alphanumeric string of `len` characters.
pub fn random_string_with<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// A user with a unique login, a random password and no games.
#[must_use]
pub fn random_user() -> FullUser {
    random_user_with(&mut rand::rng())
}

/// [`random_user`] drawing from `rng`.
pub fn random_user_with<R: Rng>(rng: &mut R) -> FullUser {
    let login = format!(
        "{LOGIN_PREFIX}{}",
        random_string_with(rng, 10).to_lowercase()
    );
    FullUser::new(login, random_password_with(rng))
}

/// A user owning between one and three random games.
#[must_use]
pub fn random_user_with_games() -> FullUser {
    random_user_with_games_with(&mut rand::rng())
}

/// [`random_user_with_games`] drawing from `rng`.
pub fn random_user_with_games_with<R: Rng>(rng: &mut R) -> FullUser {
    let count = rng.random_range(1..=3);
    let games = (0..count).map(|_| random_game_with(rng)).collect();
    FullUser {
        games,
        ..random_user_with(rng)
    }
}

/// A random password of 12 alphanumeric characters.
#[must_use]
pub fn random_password() -> String {
    random_password_with(&mut rand::rng())
}

/// [`random_password`] drawing from `rng`.
pub fn random_password_with<R: Rng>(rng: &mut R) -> String {
    random_string_with(rng, 12)
}

/// A random game with either no DLC or a single one; `has_dlcs` agrees.
pub fn random_game_with<R: Rng>(rng: &mut R) -> Game {
    let has_dlcs = rng.random_bool(0.5);
    let dlcs = if has_dlcs {
        vec![Dlc {
            dlc_name: format!("DLC {}", random_string_with(rng, 6)),
            is_dlc_free: rng.random_bool(0.3),
            price: f64::from(rng.random_range(0..5_000_u32)) / 100.0,
            rating: rng.random_range(1..=10),
            description: "Extra content".to_string(),
            similar_dlc: SimilarDlc {
                dlc_name_from_another_game: random_string_with(rng, 8),
                is_free: false,
            },
        }]
    } else {
        Vec::new()
    };
    let tags = TAGS.choose_multiple(rng, 2).map(|t| (*t).to_string()).collect();

    Game {
        game_id: None,
        title: format!("Game {}", random_string_with(rng, 8)),
        genre: pick(rng, GENRES),
        description: "Generated game".to_string(),
        price: f64::from(rng.random_range(0..10_000_u32)) / 100.0,
        publish_date: format!(
            "20{:02}-{:02}-{:02}T00:00:00",
            rng.random_range(0..25),
            rng.random_range(1..=12),
            rng.random_range(1..=28)
        ),
        rating: rng.random_range(1..=10),
        required_age: rng.random_bool(0.5),
        is_free: false,
        has_dlcs,
        company: pick(rng, COMPANIES),
        tags,
        dlcs,
        requirements: Requirements {
            os_name: "Windows".to_string(),
            ram_gb: rng.random_range(4..=32),
            hard_drive: rng.random_range(10..=200),
            video_card: "NVIDIA".to_string(),
        },
    }
}

/// A store customer in the shape `POST /users` expects.
#[must_use]
pub fn random_store_user() -> StoreUser {
    random_store_user_with(&mut rand::rng())
}

/// [`random_store_user`] drawing from `rng`.
pub fn random_store_user_with<R: Rng>(rng: &mut R) -> StoreUser {
    let suffix = random_string_with(rng, 6).to_lowercase();
    StoreUser {
        id: 0,
        email: format!("thomas.{suffix}@gmail.com"),
        username: format!("thomas_{suffix}"),
        password: random_password_with(rng),
        name: Name::new("Thomas", "Anderson"),
        address: Address {
            city: "Moscow".to_string(),
            street: "New Arbat, 12".to_string(),
            number: rng.random_range(0..100),
            zipcode: "45871-5231".to_string(),
            geolocation: Geolocation::new("-31.563", "83.4775"),
        },
        phone: "78541259647".to_string(),
    }
}

fn pick<R: Rng>(rng: &mut R, values: &[&str]) -> String {
    values.choose(rng).copied().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_random_users_are_unique() {
        let first = random_user();
        let second = random_user();

        assert!(first.login.starts_with(LOGIN_PREFIX));
        assert_ne!(first.login, second.login);
        assert!(first.games.is_empty());
        assert_eq!(first.pass.as_deref().map(str::len), Some(12));
    }

    #[test]
    fn test_seeded_generation_is_repeatable() {
        let a = random_user_with_games_with(&mut StdRng::seed_from_u64(7));
        let b = random_user_with_games_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!((1..=3).contains(&a.games.len()));
    }

    #[test]
    fn test_games_are_consistent() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let game = random_game_with(&mut rng);
            assert_eq!(game.has_dlcs, !game.dlcs.is_empty());
            assert!(game.dlcs.len() <= 1);
            assert!(GENRES.contains(&game.genre.as_str()));
            assert_eq!(game.tags.len(), 2);
        }
    }

    #[test]
    fn test_store_user_zipcode_format() {
        let user = random_store_user();
        let zip: Vec<&str> = user.address.zipcode.split('-').collect();
        assert_eq!(zip.iter().map(|p| p.len()).collect::<Vec<_>>(), vec![5, 4]);
        assert!((0..100).contains(&user.address.number));
    }
}
