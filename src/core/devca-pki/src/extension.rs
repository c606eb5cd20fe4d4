//! X.509 v3 extension file for the signing step.

/// Renders the extension configuration for a leaf certificate.
///
/// The toolkit reads this file during signing. `common_name` becomes the only
/// SAN entry and must be the exact name used in the request subject.
pub fn render_extension(common_name: &str) -> String {
    format!(
        "authorityKeyIdentifier=keyid,issuer\n\
         basicConstraints=CA:FALSE\n\
         keyUsage = digitalSignature, nonRepudiation, keyEncipherment, dataEncipherment\n\
         subjectAltName = @alt_names\n\
         \n\
         [alt_names]\n\
         DNS.1 = {common_name}\n"
    )
}
