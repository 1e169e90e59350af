//! Squad auto-generation: 23 randomized players per team.

use crate::logic::rating::refresh_team_rating;
use crate::models::{LeagueError, Player, Position, Ratings};
use crate::store::{make_id, Store};
use rand::distributions::WeightedIndex;
use rand::prelude::*;

pub const SQUAD_SIZE: usize = 23;

const FIRST_NAMES: [&str; 24] = [
    "Mohamed", "Samuel", "John", "Pierre", "Amin", "Ibrahim", "Daniel", "Kwame", "Youssef",
    "Abdou", "Hassan", "Michael", "Kofi", "Sibusiso", "Thabo", "Ali", "Omar", "Fatou", "Aisha",
    "Zainab", "Grace", "Linda", "Nana", "Elias",
];
const LAST_NAMES: [&str; 16] = [
    "Mensah", "Kamara", "Diallo", "Smith", "Jones", "Okonkwo", "Ndlovu", "Touré", "Abebe",
    "Traoré", "Adams", "Johnson", "Mahmoud", "Sow", "Bouba", "Kone",
];

fn rand_name<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {}",
        FIRST_NAMES.choose(rng).unwrap_or(&"Alex"),
        LAST_NAMES.choose(rng).unwrap_or(&"Doe"),
    )
}

/// One randomized player: 50..=100 at the natural position, 0..=50 elsewhere.
pub fn generate_player<R: Rng>(rng: &mut R, natural_pos: Position, make_captain: bool) -> Player {
    let mut ratings = Ratings::new();
    for pos in Position::ALL {
        let value = if pos == natural_pos {
            rng.gen_range(50..=100)
        } else {
            rng.gen_range(0..=50)
        };
        ratings.insert(pos, value);
    }
    Player::new(make_id("pl"), rand_name(rng), natural_pos, ratings, make_captain)
}

/// Fill a team with 23 generated players: exactly 2 guaranteed goalkeepers,
/// the remaining 21 positions drawn with weights DF 7 / MD 8 / AT 6, and one
/// random captain. Replaces any previous squad, then refreshes the cached
/// team rating. Returns (squad size, new rating).
pub fn autofill_squad<S: Store>(store: &mut S, team_id: &str) -> Result<(usize, f64), LeagueError> {
    let mut team = store
        .get_team(team_id)
        .ok_or_else(|| LeagueError::TeamNotFound(team_id.to_string()))?;

    // Re-autofill starts from a clean slate so no orphaned players linger.
    store.delete_players_by_team(team_id);

    let mut rng = thread_rng();
    let outfield = [Position::DF, Position::MD, Position::AT];
    let dist = WeightedIndex::new([7, 8, 6]).expect("positive weights");

    let mut positions = vec![Position::GK, Position::GK];
    positions.extend((0..SQUAD_SIZE - 2).map(|_| outfield[dist.sample(&mut rng)]));
    positions.shuffle(&mut rng);

    let captain_idx = rng.gen_range(0..SQUAD_SIZE);
    let mut squad_ids = Vec::with_capacity(SQUAD_SIZE);
    for (i, pos) in positions.into_iter().enumerate() {
        let mut player = generate_player(&mut rng, pos, i == captain_idx);
        player.team_id = Some(team_id.to_string());
        squad_ids.push(player.id.clone());
        store.insert_player(player);
    }

    team.squad = squad_ids;
    store.update_team(&team);
    let rating = refresh_team_rating(store, team_id)?;
    Ok((SQUAD_SIZE, rating))
}
