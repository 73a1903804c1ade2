pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn message_serializes_as_single_field() {
        let m = types::Message::new("Status atualizado com sucesso");
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v, serde_json::json!({"message": "Status atualizado com sucesso"}));
    }
}
