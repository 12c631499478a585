use crate::record::Game;

/// Builds a game whose sales all come from North America.
pub(crate) fn game(name: &str, platform: &str, year: Option<i32>, genre: &str, sales: f64) -> Game {
    Game {
        name: name.to_owned(),
        platform: platform.to_owned(),
        year_of_release: year,
        genre: genre.to_owned(),
        na_sales: sales,
        eu_sales: 0.0,
        jp_sales: 0.0,
        other_sales: 0.0,
        critic_score: None,
        user_score: None,
        rating: None,
        total_sales: sales,
    }
}

pub(crate) fn scored(mut game: Game, critic: Option<f64>, user: Option<f64>) -> Game {
    game.critic_score = critic;
    game.user_score = user;
    game
}
