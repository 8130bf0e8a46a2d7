//! Static substitute collections used when the backend is unreachable (or,
//! for some views, legitimately empty). Same field shape as live data, so the
//! projection pipeline never branches on provenance. Ids are synthetic
//! literals and unique within each collection.

use crate::model::{Post, Recipe, Restaurant};

pub fn sample_restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant {
            id: "r-fallback-1".to_string(),
            name: "Fat Sal's Deli".to_string(),
            rating: Some(4.4),
            price_level: Some(1),
            distance_value: Some(650.0),
            distance_text: Some("0.4 mi".to_string()),
            duration_text: Some("3 min".to_string()),
            address: Some("972 Gayley Ave".to_string()),
        },
        Restaurant {
            id: "r-fallback-2".to_string(),
            name: "Ike's Love & Sandwiches".to_string(),
            rating: Some(4.3),
            price_level: Some(1),
            distance_value: Some(900.0),
            distance_text: Some("0.6 mi".to_string()),
            duration_text: Some("4 min".to_string()),
            address: Some("10874 Kinross Ave".to_string()),
        },
        Restaurant {
            id: "r-fallback-3".to_string(),
            name: "Sepi's Giant Submarines".to_string(),
            rating: Some(4.1),
            price_level: Some(1),
            distance_value: Some(1200.0),
            distance_text: Some("0.7 mi".to_string()),
            duration_text: Some("5 min".to_string()),
            address: Some("10968 Le Conte Ave".to_string()),
        },
    ]
}

pub fn sample_posts() -> Vec<Post> {
    vec![
        Post {
            id: "p1".to_string(),
            text: "Diddy Riese for dessert—cash only!".to_string(),
            votes: 12,
            tag: "Dessert".to_string(),
            author: "Anonymous Bruin".to_string(),
            created_at: None,
            time: Some("Today".to_string()),
        },
        Post {
            id: "p2".to_string(),
            text: "Kerckhoff coffee happy hour 2–4pm".to_string(),
            votes: 7,
            tag: "Happy Hour".to_string(),
            author: "2nd-year CS".to_string(),
            created_at: None,
            time: Some("3h".to_string()),
        },
    ]
}

pub fn sample_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "rec-fallback-1".to_string(),
            title: "TJ's Cauliflower Gnocchi + Marinara".to_string(),
        },
        Recipe {
            id: "rec-fallback-2".to_string(),
            title: "$5 Ralphs Lentil Soup Hack".to_string(),
        },
    ]
}
