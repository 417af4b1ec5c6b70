//! API endpoint URL builders

/// Build the VEP lookup-by-identifier URL
pub fn vep_id_url(base_url: &str, species: &str, identifier: &str) -> String {
    format!(
        "{}/vep/{}/id/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(species),
        urlencoding::encode(identifier)
    )
}
