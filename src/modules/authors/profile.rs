//! Conversions between persistence entities and the transfer models.

use courselib_db::{Author, Course};
use time::{Date, OffsetDateTime};

use super::models::{AuthorDto, CourseDto, CourseForCreation, CourseForUpdate};

impl From<&Course> for CourseDto {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            author_id: course.author_id,
            title: course.title.clone(),
            description: course.description.clone(),
        }
    }
}

impl From<Course> for CourseDto {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            author_id: course.author_id,
            title: course.title,
            description: course.description,
        }
    }
}

/// The new course is not attached to an author yet; the repository sets
/// `author_id` when the course is added.
impl From<CourseForCreation> for Course {
    fn from(input: CourseForCreation) -> Self {
        Course::new(input.title, input.description)
    }
}

impl From<&Course> for CourseForUpdate {
    fn from(course: &Course) -> Self {
        Self {
            title: Some(course.title.clone()),
            description: course.description.clone(),
        }
    }
}

impl CourseForUpdate {
    /// Overwrite the fields present in `self`, keep the rest.
    pub fn apply_to(self, course: &mut Course) {
        if let Some(title) = self.title {
            course.title = title;
        }
        if let Some(description) = self.description {
            course.description = Some(description);
        }
    }
}

impl AuthorDto {
    pub fn from_author(author: &Author, today: Date) -> Self {
        Self {
            id: author.id,
            name: format!("{} {}", author.first_name, author.last_name),
            age: age_on(author.date_of_birth, today),
            main_category: author.main_category.clone(),
        }
    }
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self::from_author(author, OffsetDateTime::now_utc().date())
    }
}

/// Whole years between `date_of_birth` and `today`.
pub fn age_on(date_of_birth: Date, today: Date) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    let birthday_pending = (u8::from(today.month()), today.day())
        < (u8::from(date_of_birth.month()), date_of_birth.day());
    if birthday_pending {
        age -= 1;
    }
    age
}
