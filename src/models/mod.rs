mod artist;
mod category;
mod drink;
mod question;
mod show;
mod venue;

pub use artist::{Artist, NewArtist, UpdateArtist};
pub use category::{Category, CategoryMap, category_map};
pub use drink::{Drink, Ingredient, IngredientPortion, NewDrink, UpdateDrink, short_recipe};
pub use question::{NewQuestion, Question};
pub use show::{
    NewShow, START_TIME_DISPLAY_FORMAT, START_TIME_INPUT_FORMAT, Show, ShowTiming,
    display_start_time, parse_start_time,
};
pub use venue::{NewVenue, UpdateVenue, Venue};
