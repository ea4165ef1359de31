//! Diesel schema for the catalog tables.

diesel::table! {
    planets (id) {
        id -> Text,
        name -> Text,
        rotation_period -> Text,
        orbital_period -> Text,
        diameter -> Text,
        climate -> Text,
        gravity -> Text,
        terrain -> Text,
        surface_water -> Text,
        population -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    species (id) {
        id -> Text,
        name -> Text,
        classification -> Text,
        designation -> Text,
        average_height -> Text,
        average_lifespan -> Text,
        hair_colors -> Text,
        skin_colors -> Text,
        eye_colors -> Text,
        language -> Text,
        planet_id -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    characters (id) {
        id -> Text,
        name -> Text,
        height -> Text,
        mass -> Text,
        hair_color -> Text,
        skin_color -> Text,
        eye_color -> Text,
        birth_year -> Text,
        gender -> Text,
        planet_id -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    vehicles (id) {
        id -> Text,
        name -> Text,
        model -> Text,
        manufacturer -> Text,
        cost_in_credits -> Text,
        length -> Text,
        max_atmosphering_speed -> Text,
        crew -> Text,
        passengers -> Text,
        cargo_capacity -> Text,
        consumables -> Text,
        vehicle_class -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    starships (id) {
        id -> Text,
        name -> Text,
        model -> Text,
        manufacturer -> Text,
        cost_in_credits -> Text,
        length -> Text,
        max_atmosphering_speed -> Text,
        crew -> Text,
        passengers -> Text,
        cargo_capacity -> Text,
        consumables -> Text,
        hyperdrive_rating -> Text,
        mglt -> Text,
        starship_class -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    films (id) {
        id -> Text,
        title -> Text,
        episode_id -> Integer,
        opening_crawl -> Text,
        director -> Text,
        producer -> Text,
        release_date -> Date,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    character_species (character_id, species_id) {
        character_id -> Text,
        species_id -> Text,
    }
}

diesel::table! {
    vehicle_pilots (vehicle_id, character_id) {
        vehicle_id -> Text,
        character_id -> Text,
    }
}

diesel::table! {
    starship_pilots (starship_id, character_id) {
        starship_id -> Text,
        character_id -> Text,
    }
}

diesel::table! {
    film_characters (film_id, character_id) {
        film_id -> Text,
        character_id -> Text,
    }
}

diesel::table! {
    film_planets (film_id, planet_id) {
        film_id -> Text,
        planet_id -> Text,
    }
}

diesel::table! {
    film_species (film_id, species_id) {
        film_id -> Text,
        species_id -> Text,
    }
}

diesel::table! {
    film_vehicles (film_id, vehicle_id) {
        film_id -> Text,
        vehicle_id -> Text,
    }
}

diesel::table! {
    film_starships (film_id, starship_id) {
        film_id -> Text,
        starship_id -> Text,
    }
}

diesel::joinable!(species -> planets (planet_id));
diesel::joinable!(characters -> planets (planet_id));
diesel::joinable!(character_species -> characters (character_id));
diesel::joinable!(character_species -> species (species_id));
diesel::joinable!(vehicle_pilots -> vehicles (vehicle_id));
diesel::joinable!(vehicle_pilots -> characters (character_id));
diesel::joinable!(starship_pilots -> starships (starship_id));
diesel::joinable!(starship_pilots -> characters (character_id));
diesel::joinable!(film_characters -> films (film_id));
diesel::joinable!(film_characters -> characters (character_id));
diesel::joinable!(film_planets -> films (film_id));
diesel::joinable!(film_planets -> planets (planet_id));
diesel::joinable!(film_species -> films (film_id));
diesel::joinable!(film_species -> species (species_id));
diesel::joinable!(film_vehicles -> films (film_id));
diesel::joinable!(film_vehicles -> vehicles (vehicle_id));
diesel::joinable!(film_starships -> films (film_id));
diesel::joinable!(film_starships -> starships (starship_id));

diesel::allow_tables_to_appear_in_same_query!(
    planets,
    species,
    characters,
    vehicles,
    starships,
    films,
    character_species,
    vehicle_pilots,
    starship_pilots,
    film_characters,
    film_planets,
    film_species,
    film_vehicles,
    film_starships,
);
