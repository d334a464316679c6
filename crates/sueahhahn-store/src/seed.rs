//! Demo data written on first run, when no usable snapshot exists.
//!
//! Ids are fixed so the demo accounts are stable across machines. Every
//! account's password is [`DEMO_PASSWORD`].

use sueahhahn_shared::credential::{Credential, CredentialConfig};
use sueahhahn_shared::error::CredentialError;
use sueahhahn_shared::types::{NotificationId, NotificationKind, ProductId, ReviewId, Uid};

use crate::models::{Notification, Product, Review, User};
use crate::snapshot::Snapshot;

pub const DEMO_PASSWORD: &str = "1234";

struct DemoUser {
    uid: &'static str,
    username: &'static str,
    display_name: &'static str,
    bio: &'static str,
    is_admin: bool,
}

const USERS: &[DemoUser] = &[
    DemoUser {
        uid: "u-admin",
        username: "admin",
        display_name: "ผู้ดูแลระบบ",
        bio: "ดูแลตลาด Sue AhHahn",
        is_admin: true,
    },
    DemoUser {
        uid: "u-somtam",
        username: "somtam_auntie",
        display_name: "ป้าส้มตำ",
        bio: "ส้มตำรสเด็ด ตำสดทุกจาน",
        is_admin: false,
    },
    DemoUser {
        uid: "u-noodle",
        username: "noodle_uncle",
        display_name: "ลุงก๋วยเตี๋ยว",
        bio: "ก๋วยเตี๋ยวเรือสูตรโบราณ",
        is_admin: false,
    },
    DemoUser {
        uid: "u-foodie",
        username: "foodie_may",
        display_name: "เมย์ชอบกิน",
        bio: "ตามหาของอร่อยทั่วกรุง",
        is_admin: false,
    },
];

struct DemoProduct {
    id: &'static str,
    seller: &'static str,
    name: &'static str,
    description: &'static str,
    price: f64,
    stock: u32,
}

const PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        id: "prod-somtam",
        seller: "u-somtam",
        name: "ส้มตำไทย",
        description: "มะละกอสด ถั่วฝักยาว มะเขือเทศ กุ้งแห้ง",
        price: 45.0,
        stock: 20,
    },
    DemoProduct {
        id: "prod-gaiyang",
        seller: "u-somtam",
        name: "ไก่ย่าง",
        description: "ไก่ย่างหนังกรอบ พร้อมน้ำจิ้มแจ่ว",
        price: 80.0,
        stock: 10,
    },
    DemoProduct {
        id: "prod-boatnoodle",
        seller: "u-noodle",
        name: "ก๋วยเตี๋ยวเรือ",
        description: "น้ำซุปเข้มข้น หมูตุ๋นนุ่ม",
        price: 50.0,
        stock: 30,
    },
];

/// Build the demo snapshot. Only fails if `credentials` are unusable.
pub fn demo_snapshot(credentials: &CredentialConfig) -> Result<Snapshot, CredentialError> {
    let credential = Credential::hash(DEMO_PASSWORD, credentials)?;

    let mut users: Vec<User> = USERS
        .iter()
        .map(|demo| User {
            uid: Uid::from(demo.uid),
            username: demo.username.to_string(),
            credential: credential.clone(),
            display_name: demo.display_name.to_string(),
            bio: demo.bio.to_string(),
            profile_pic: format!("https://i.pravatar.cc/150?u={}", demo.username),
            following: Default::default(),
            friends: Default::default(),
            rating: 0.0,
            review_count: 0,
            is_admin: demo.is_admin,
        })
        .collect();

    let products = PRODUCTS
        .iter()
        .map(|demo| Product {
            id: ProductId::from(demo.id),
            seller_uid: Uid::from(demo.seller),
            name: demo.name.to_string(),
            description: demo.description.to_string(),
            price: demo.price,
            image: format!("https://picsum.photos/seed/{}/400/400", demo.id),
            stock: demo.stock,
            is_hidden: false,
        })
        .collect();

    let review = Review {
        id: ReviewId::from("rev-welcome"),
        ..Review::new(
            Uid::from("u-somtam"),
            Uid::from("u-foodie"),
            5,
            "แซ่บมาก! จะกลับมาสั่งอีก",
        )
    };
    if let Some(seller) = users.iter_mut().find(|u| u.uid == review.seller_uid) {
        seller.rating = f64::from(review.rating);
        seller.review_count = 1;
    }
    if let Some(buyer) = users.iter_mut().find(|u| u.uid.as_str() == "u-foodie") {
        buyer.following.insert(Uid::from("u-somtam"));
    }

    let welcome = Notification {
        id: NotificationId::from("notif-welcome"),
        ..Notification::new(
            Uid::from("u-foodie"),
            NotificationKind::System,
            "ยินดีต้อนรับสู่ Sue AhHahn! 🍜",
            "เริ่มติดตามร้านโปรดของคุณได้เลย",
        )
    };

    Ok(Snapshot {
        users,
        products,
        reviews: vec![review],
        notifications: vec![welcome],
    })
}
