use std::net::{Ipv4Addr, SocketAddr};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to (`EXAM_ALLOC_BIND`).
    pub bind_addr: SocketAddr,

    /// Default `env_logger` filter when `RUST_LOG` is unset (`EXAM_ALLOC_LOG`).
    pub log_filter: String,

    /// Courses mixed per room when a request does not say
    /// (`EXAM_ALLOC_MAX_COURSES`). Ignored by course-wise allocation.
    pub default_max_courses: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            log_filter: "info".to_string(),
            default_max_courses: 3,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_addr = std::env::var("EXAM_ALLOC_BIND")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.bind_addr);
        let log_filter = std::env::var("EXAM_ALLOC_LOG").unwrap_or(defaults.log_filter);
        let default_max_courses = std::env::var("EXAM_ALLOC_MAX_COURSES")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.default_max_courses);

        Self {
            bind_addr,
            log_filter,
            default_max_courses,
        }
    }
}
