//! Sample Data Seeder
//!
//! Loads a small catalogue with three readers, eight books, and a handful of
//! reviews when the binary is started with `--seed`. Reviews are written in
//! bulk, then every book's aggregate is recomputed once, the same contract
//! the request path follows per mutation.

use anyhow::Result;

use crate::catalog::types::{Book, BookId, Genre, DEFAULT_LANGUAGE};
use crate::ratings::aggregate::recompute_book_rating;
use crate::reviews::types::{Review, ReviewId};
use crate::store::{now_ms, Store};
use crate::users::types::{User, UserId, DEFAULT_AVATAR};

struct SeedBook {
    title: &'static str,
    author: &'static str,
    description: &'static str,
    genre: Genre,
    year: u32,
    isbn: &'static str,
    pages: u32,
    cover: &'static str,
    featured: bool,
}

const SAMPLE_BOOKS: [SeedBook; 8] = [
    SeedBook {
        title: "The Great Gatsby",
        author: "F. Scott Fitzgerald",
        description: "A story of the fabulously wealthy Jay Gatsby and his love for the beautiful Daisy Buchanan, of lavish parties on Long Island at a time when The New York Times noted \"gin was the national drink and sex the national obsession.\"",
        genre: Genre::Fiction,
        year: 1925,
        isbn: "978-0743273565",
        pages: 180,
        cover: "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1490528560i/4671.jpg",
        featured: true,
    },
    SeedBook {
        title: "To Kill a Mockingbird",
        author: "Harper Lee",
        description: "The unforgettable novel of a childhood in a sleepy Southern town and the crisis of conscience that rocked it, addressing issues of race, inequality and segregation with both compassion and humor.",
        genre: Genre::Fiction,
        year: 1960,
        isbn: "978-0446310789",
        pages: 281,
        cover: "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1553383690i/2657.jpg",
        featured: true,
    },
    SeedBook {
        title: "1984",
        author: "George Orwell",
        description: "A dystopian novel about totalitarianism and surveillance society, following the life of Winston Smith, a low-ranking member of the ruling Party in London.",
        genre: Genre::Fiction,
        year: 1949,
        isbn: "978-0451524935",
        pages: 328,
        cover: "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1532714506i/40961427.jpg",
        featured: true,
    },
    SeedBook {
        title: "Pride and Prejudice",
        author: "Jane Austen",
        description: "The story follows the main character Elizabeth Bennet as she deals with issues of manners, upbringing, morality, education, and marriage in the society of the landed gentry of the British Regency.",
        genre: Genre::Romance,
        year: 1813,
        isbn: "978-0141439518",
        pages: 432,
        cover: "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1320399351i/1885.jpg",
        featured: false,
    },
    SeedBook {
        title: "The Hobbit",
        author: "J.R.R. Tolkien",
        description: "A fantasy novel about the adventures of Bilbo Baggins, a hobbit who embarks on a quest to reclaim the Lonely Mountain from the dragon Smaug.",
        genre: Genre::Fantasy,
        year: 1937,
        isbn: "978-0547928241",
        pages: 366,
        cover: "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1546071216i/5907.jpg",
        featured: false,
    },
    SeedBook {
        title: "The Da Vinci Code",
        author: "Dan Brown",
        description: "A mystery thriller novel about a murder in the Louvre Museum and a religious mystery that leads to a trail of clues found in the works of Leonardo da Vinci.",
        genre: Genre::Mystery,
        year: 2003,
        isbn: "978-0307474278",
        pages: 689,
        cover: "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1579621264i/968.jpg",
        featured: false,
    },
    SeedBook {
        title: "Steve Jobs",
        author: "Walter Isaacson",
        description: "The biography of Steve Jobs, the co-founder and CEO of Apple Inc., based on more than forty interviews with Jobs conducted over two years.",
        genre: Genre::Biography,
        year: 2011,
        isbn: "978-1451648539",
        pages: 656,
        cover: "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1511288482i/11084145.jpg",
        featured: false,
    },
    SeedBook {
        title: "Sapiens: A Brief History of Humankind",
        author: "Yuval Noah Harari",
        description: "A groundbreaking narrative of humanity's creation and evolution that explores the ways in which biology and history have defined us and enhanced our understanding of what it means to be \"human.\"",
        genre: Genre::NonFiction,
        year: 2011,
        isbn: "978-0062316097",
        pages: 443,
        cover: "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1420595954i/23692271.jpg",
        featured: false,
    },
];

const SAMPLE_REVIEWS: [(u8, &str); 5] = [
    (5, "An absolute masterpiece! Fitzgerald's prose is simply beautiful and the story is both tragic and compelling. The way he captures the essence of the American Dream and its corruption is timeless."),
    (4, "A powerful and moving story that addresses important themes of justice, racism, and growing up. Scout's perspective as a child makes the story even more impactful."),
    (5, "Disturbing and prophetic. Orwell's vision of a totalitarian future is as relevant today as it was when written. A must-read for understanding power and control."),
    (4, "A delightful romantic comedy of manners. Austen's wit and social commentary are brilliant, and the love story between Elizabeth and Darcy is unforgettable."),
    (5, "A wonderful adventure story that introduces readers to Middle-earth. Tolkien's world-building is incredible, and Bilbo's journey is both exciting and heartwarming."),
];

/// Seeds users, books, and reviews, then settles every book's aggregate.
pub async fn load_sample_data(store: &Store) -> Result<()> {
    let now = now_ms();

    let mut users = vec![
        sample_user(
            "admin",
            "admin@bookworm.com",
            "Administrator of BookWorm platform",
            vec![Genre::Fiction, Genre::NonFiction],
            true,
            now,
        ),
        sample_user(
            "booklover",
            "booklover@example.com",
            "Passionate reader and reviewer",
            vec![Genre::Mystery, Genre::Romance, Genre::Fantasy],
            false,
            now,
        ),
        sample_user(
            "literarycritic",
            "critic@example.com",
            "Professional book critic and avid reader",
            vec![Genre::NonFiction, Genre::Biography, Genre::History],
            false,
            now,
        ),
    ];

    let admin_id = users[0].id.clone();

    let mut book_ids = Vec::with_capacity(SAMPLE_BOOKS.len());
    for (i, seed) in SAMPLE_BOOKS.iter().enumerate() {
        let book = Book {
            id: BookId::new(),
            title: seed.title.to_string(),
            author: seed.author.to_string(),
            description: seed.description.to_string(),
            cover_image: seed.cover.to_string(),
            genre: seed.genre,
            published_year: seed.year,
            isbn: Some(seed.isbn.to_string()),
            pages: Some(seed.pages),
            language: DEFAULT_LANGUAGE.to_string(),
            average_rating: 0.0,
            total_reviews: 0,
            total_ratings: 0,
            featured: seed.featured,
            added_by: admin_id.clone(),
            created_at: now + i as u64,
        };
        book_ids.push(book.id.clone());
        store.save_book(book).await?;
    }

    // Reviews alternate between the two non-admin readers, one per book.
    for (i, (rating, text)) in SAMPLE_REVIEWS.iter().enumerate() {
        let author_idx = 1 + (i % 2);
        let review = Review {
            id: ReviewId::new(),
            book_id: book_ids[i].clone(),
            user_id: users[author_idx].id.clone(),
            rating: *rating,
            review: text.to_string(),
            helpful: 0,
            helpful_votes: Vec::new(),
            spoiler: false,
            created_at: now + i as u64,
            updated_at: now + i as u64,
        };
        store.save_review(review).await?;
        users[author_idx].total_reviews += 1;
    }

    let user_count = users.len();
    for user in users {
        store.save_user(user).await?;
    }

    // Bulk load done: settle each book's aggregate once.
    for book_id in &book_ids {
        recompute_book_rating(store, book_id).await?;
    }

    tracing::info!(
        "Seeded {} users, {} books, {} reviews",
        user_count,
        book_ids.len(),
        SAMPLE_REVIEWS.len()
    );
    Ok(())
}

fn sample_user(
    username: &str,
    email: &str,
    bio: &str,
    favorite_genres: Vec<Genre>,
    is_admin: bool,
    now: u64,
) -> User {
    User {
        id: UserId::new(),
        username: username.to_string(),
        email: email.to_string(),
        bio: bio.to_string(),
        avatar: DEFAULT_AVATAR.to_string(),
        favorite_genres,
        is_admin,
        total_reviews: 0,
        member_since: now,
    }
}
