pub mod data_layer;
pub mod data_layer_error;
pub mod dice;
pub mod settings;

pub mod models {
    pub mod roll_models;
    pub mod statistics_models;
}

pub mod routes {
    pub mod roll_routes;
    pub mod statistics_routes;
}

pub mod services {
    pub mod roll_service;
    pub mod statistics_service;
}
