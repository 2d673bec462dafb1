//! Classification des identifiants : schéma, suffixe, noms et chemins sûrs
//!
//! Les fonctions libres implémentent les règles par défaut ; le trait
//! [`UriPolicy`] permet à l'application d'en substituer d'autres.

/// Schémas acceptés par défaut pour la lecture en flux
pub const DEFAULT_SCHEMES: &[&str] = &["http", "https", "mms", "mmsh", "mmst", "mmsu"];

/// Retourne le schéma d'une URI (`http` pour `http://host/a.m3u`)
///
/// Un schéma commence par une lettre, ne contient que des alphanumériques,
/// `+`, `-` ou `.`, et est suivi de `://`.
pub fn uri_scheme(uri: &str) -> Option<&str> {
    let (scheme, _) = uri.split_once("://")?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        Some(scheme)
    } else {
        None
    }
}

/// Vrai si l'identifiant porte un schéma de transport explicite
pub fn has_scheme(uri: &str) -> bool {
    uri_scheme(uri).is_some()
}

/// Vrai si l'URI désigne un fichier local (chemin absolu ou `file://`)
pub fn is_local_file_uri(uri: &str) -> bool {
    uri.starts_with('/') || uri_scheme(uri).is_some_and(|s| s.eq_ignore_ascii_case("file"))
}

/// Extension du dernier segment, sans requête ni fragment
///
/// ```
/// use pmoqueue::uri::uri_suffix;
///
/// assert_eq!(uri_suffix("http://radio/list.pls?id=3"), Some("pls"));
/// assert_eq!(uri_suffix("/music/.hidden"), None);
/// ```
pub fn uri_suffix(uri: &str) -> Option<&str> {
    let end = uri.find(|c| c == '?' || c == '#').unwrap_or(uri.len());
    let name = uri[..end].rsplit('/').next()?;
    match name.rsplit_once('.') {
        Some((stem, suffix)) if !stem.is_empty() && !suffix.is_empty() => Some(suffix),
        _ => None,
    }
}

/// Vrai si `name` peut désigner une playlist enregistrée
///
/// Les noms ne contiennent ni `/` ni retour chariot/saut de ligne (limitation
/// du protocole client), et ne peuvent pas valoir `.` ou `..`.
pub fn is_valid_playlist_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(|c| matches!(c, '/' | '\n' | '\r'))
}

/// Vrai si `path` reste confiné dans la racine de la bibliothèque une fois joint
///
/// Refuse les chemins vides ou absolus, les antislashs et NUL, ainsi que tout
/// segment vide, `.` ou `..`.
pub fn is_safe_local(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.contains(|c| matches!(c, '\\' | '\0'))
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

/// Règles de classification utilisées par le chargeur et le filtre d'acceptation
pub trait UriPolicy: Send + Sync {
    fn has_scheme(&self, uri: &str) -> bool {
        has_scheme(uri)
    }

    /// Vrai si le schéma de `uri` est lisible en flux par l'application
    fn scheme_is_supported(&self, uri: &str) -> bool;

    fn is_valid_stored_playlist_name(&self, name: &str) -> bool {
        is_valid_playlist_name(name)
    }

    fn is_safe_library_path(&self, path: &str) -> bool {
        is_safe_local(path)
    }
}

/// Politique par défaut : règles ci-dessus et liste de schémas configurable
#[derive(Debug, Clone)]
pub struct StandardUriPolicy {
    schemes: Vec<String>,
}

impl StandardUriPolicy {
    /// Crée une politique acceptant les schémas donnés (comparaison insensible à la casse)
    pub fn new<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schemes: schemes
                .into_iter()
                .map(|s| s.into().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn schemes(&self) -> &[String] {
        &self.schemes
    }
}

impl Default for StandardUriPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEMES.iter().copied())
    }
}

impl UriPolicy for StandardUriPolicy {
    fn scheme_is_supported(&self, uri: &str) -> bool {
        uri_scheme(uri).is_some_and(|scheme| {
            self.schemes
                .iter()
                .any(|known| known.eq_ignore_ascii_case(scheme))
        })
    }
}
