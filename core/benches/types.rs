use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub trait Generate {
    fn generate<R>(rng: &mut R) -> Self
    where
        R: Rng;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Payment {
    Card { holder: String, last_digits: u16 },
    Voucher(String),
    Credit(u64),
}

impl Generate for Payment {
    fn generate<R>(rng: &mut R) -> Self
    where
        R: Rng,
    {
        let holders = ["john", "malkovitch", "rocks"];
        match rng.random_range::<usize, _>(0..3) {
            0 => Self::Card {
                holder: holders.choose(rng).unwrap().to_string(),
                last_digits: rng.random_range(0..10000),
            },
            1 => Self::Voucher(holders.choose(rng).unwrap().to_string()),
            2 => Self::Credit(rng.random()),
            _ => unreachable!(),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
}

impl Generate for Product {
    fn generate<R>(rng: &mut R) -> Self
    where
        R: Rng,
    {
        let names = ["sword", "shield", "potion", "scroll"];
        Self {
            id: rng.random_range(0..100000),
            name: names.choose(rng).unwrap().to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Order {
    quantity: u32,
    discount: f64,
    product: Product,
    tags: HashMap<String, i32>,
}

impl Generate for Order {
    fn generate<R>(rng: &mut R) -> Self
    where
        R: Rng,
    {
        let tag_names = ["gift", "express", "fragile"];
        let count = rng.random_range(0..10);
        Self {
            quantity: rng.random_range(1..50),
            discount: rng.random_range(0.0..0.5),
            product: Product::generate(rng),
            tags: std::iter::from_fn(|| {
                Some((
                    tag_names.choose(rng).unwrap().to_string(),
                    rng.random_range(-100..100),
                ))
            })
            .take(count)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nick_name: Option<String>,
    payment: Payment,
    orders: Vec<Order>,
}

impl Generate for Customer {
    fn generate<R>(rng: &mut R) -> Self
    where
        R: Rng,
    {
        let user_names = ["abra", "cadabra", "hocus", "pocus"];
        let nick_names = ["Adam", "Eve", "Maria", "Neil"];
        let count = rng.random_range(0..50);
        Self {
            user_name: user_names.choose(rng).unwrap().to_string(),
            nick_name: if rng.random() {
                Some(nick_names.choose(rng).unwrap().to_string())
            } else {
                None
            },
            payment: Payment::generate(rng),
            orders: std::iter::from_fn(|| Some(Order::generate(rng)))
                .take(count)
                .collect(),
        }
    }
}
