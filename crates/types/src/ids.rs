/// Generate an entity id with the given prefix
///
/// # Arguments
/// * `prefix` - The resource prefix (e.g., "cus", "sub", "si", "pi", "in")
///
/// # Returns
/// An id in the format `{prefix}_{24_char_uuid}`
///
/// # Example
/// ```
/// let customer_id = billsim_types::generate_id("cus");
/// assert!(customer_id.starts_with("cus_"));
/// ```
pub fn generate_id(prefix: &str) -> String {
    let uuid_str = uuid::Uuid::new_v4().to_string().replace("-", "");
    format!("{}_{}", prefix, &uuid_str[..24])
}
