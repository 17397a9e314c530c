pub mod director;
pub mod genre;
pub mod movie;
pub mod movie_detail;
pub mod movie_genre;
