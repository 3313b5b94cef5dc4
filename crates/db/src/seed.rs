//! Demo data loaded into the in-memory store at startup.

use anyhow::ensure;
use time::macros::date;
use uuid::Uuid;

use crate::entities::{Author, Course};
use crate::memory::InMemoryStore;
use crate::repository::CourseLibraryRepository;

pub const BERRY_GRIFFIN_ID: Uuid = Uuid::from_u128(0xd28888e9_2ba9_473a_a40f_e38cb54f9b35);
pub const NANCY_RYE_ID: Uuid = Uuid::from_u128(0xda2fd609_d754_4feb_8acd_c4f9ff13ba96);
pub const ELI_BONES_ID: Uuid = Uuid::from_u128(0x2902b665_1190_4c70_9915_b9c2d7680450);
pub const ARNOLD_OAK_ID: Uuid = Uuid::from_u128(0x102b566b_ba1f_404c_b2df_e2cde39ade09);

pub const COMMANDEERING_SHIP_ID: Uuid = Uuid::from_u128(0x5b1c2b4d_48c7_402a_80c3_cc796ad49c6b);
pub const OVERTHROWING_MUTINY_ID: Uuid = Uuid::from_u128(0xd8663e5e_7494_4f81_8739_6e0de1bea7ee);
pub const AVOIDING_BRAWLS_ID: Uuid = Uuid::from_u128(0xd173e20d_159e_4127_9ce9_b0ac2564ad97);
pub const SINGALONG_PIRATE_ID: Uuid = Uuid::from_u128(0x40ff5488_fdab_45b5_bc3a_14302d59869a);

/// Stage and commit the demo authors and courses in one unit of work.
pub async fn seed(store: &InMemoryStore) -> anyhow::Result<()> {
    let repository = store.unit_of_work();

    let authors = [
        Author {
            id: BERRY_GRIFFIN_ID,
            first_name: "Berry".to_string(),
            last_name: "Griffin Beak Eldritch".to_string(),
            date_of_birth: date!(1650 - 07 - 23),
            main_category: "Ships".to_string(),
        },
        Author {
            id: NANCY_RYE_ID,
            first_name: "Nancy".to_string(),
            last_name: "Swashbuckler Rye".to_string(),
            date_of_birth: date!(1668 - 05 - 21),
            main_category: "Rum".to_string(),
        },
        Author {
            id: ELI_BONES_ID,
            first_name: "Eli".to_string(),
            last_name: "Ivory Bones Sweet".to_string(),
            date_of_birth: date!(1701 - 12 - 16),
            main_category: "Singing".to_string(),
        },
        Author {
            id: ARNOLD_OAK_ID,
            first_name: "Arnold".to_string(),
            last_name: "Oak Eldritch".to_string(),
            date_of_birth: date!(1702 - 03 - 06),
            main_category: "Singing".to_string(),
        },
    ];
    for author in authors {
        repository.add_author(author).await;
    }

    let courses = [
        (
            BERRY_GRIFFIN_ID,
            COMMANDEERING_SHIP_ID,
            "Commandeering a Ship Without Getting Caught",
            "Commandeering a ship in rough waters isn't easy. Learn the tricks of the trade.",
        ),
        (
            BERRY_GRIFFIN_ID,
            OVERTHROWING_MUTINY_ID,
            "Overthrowing Mutiny",
            "In this course, the author provides tips to avoid, or, if needed, overthrow pirate mutiny.",
        ),
        (
            NANCY_RYE_ID,
            AVOIDING_BRAWLS_ID,
            "Avoiding Brawls While Drinking as Much Rum as You Desire",
            "Every good pirate loves rum, but it also has a tendency to get you into trouble.",
        ),
        (
            ELI_BONES_ID,
            SINGALONG_PIRATE_ID,
            "Singalong Pirate Hits",
            "In this course you'll learn how to sing all-time favourite pirate songs.",
        ),
    ];
    for (author_id, course_id, title, description) in courses {
        let course = Course {
            id: course_id,
            author_id,
            title: title.to_string(),
            description: Some(description.to_string()),
        };
        repository.add_course(author_id, course).await?;
    }

    ensure!(repository.save().await?, "seed data was rejected by the store");
    tracing::info!(target: "courselib-db", authors = 4, courses = 4, "seeded course library");
    Ok(())
}
