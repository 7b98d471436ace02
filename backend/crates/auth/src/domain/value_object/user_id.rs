use kernel::id::{Id, markers};

pub type UserId = Id<markers::User>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_from_raw() {
        let user_id = UserId::from_raw(42);
        assert_eq!(user_id.get(), 42);
        assert_eq!(user_id.to_string(), "42");
    }
}
