use optfold_parser::Name;
use tracing::trace;

use crate::{
    errors::SpecError,
    resolve::{Collision, Mode, Resolver},
    spec::OptionSpec,
    value::Kind,
};

/// Identifies a single option within an [`OptionSet`]. Ids are assigned in
/// declaration order, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionId(usize);

impl OptionId {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Entry {
    spec: OptionSpec,
    dependencies: Vec<OptionId>,
}

/**
A validated collection of [`OptionSpec`]s, ready to parse with. Creating an
`OptionSet` is where all of the specification checks happen: every name must
be well formed and unique (after removing leading dashes), every dependency
must name another option in the set, and every default must be the right kind
and pass its option's validators.
*/
#[derive(Debug, Clone)]
pub struct OptionSet {
    entries: Vec<Entry>,
    resolver: Resolver,
}

impl OptionSet {
    pub fn new(specs: impl IntoIterator<Item = OptionSpec>) -> Result<Self, SpecError> {
        let mut resolver = Resolver::default();
        let mut registered: Vec<OptionSpec> = Vec::new();

        for spec in specs {
            let id = OptionId::new(registered.len());

            for raw in spec.names() {
                let name = Name::parse(raw).ok_or_else(|| SpecError::InvalidName {
                    name: raw.clone(),
                })?;

                resolver
                    .insert(name, id, spec.is_case_insensitive())
                    .map_err(|Collision(existing)| SpecError::DuplicateName {
                        name: raw.clone(),
                        existing: registered
                            .get(existing.index())
                            .unwrap_or(&spec)
                            .identifier()
                            .to_owned(),
                    })?;
            }

            check_validators(&spec)?;
            check_default(&spec)?;

            trace!(option = %spec, "registered option");
            registered.push(spec);
        }

        let entries = registered
            .into_iter()
            .map(|spec| -> Result<Entry, SpecError> {
                let dependencies = spec
                    .dependencies()
                    .iter()
                    .map(|dependency| {
                        resolver
                            .find(dependency.trim_start_matches('-'))
                            .ok_or_else(|| SpecError::UnknownDependency {
                                option: spec.identifier().to_owned(),
                                dependency: dependency.clone(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Entry { spec, dependencies })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries, resolver })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an option by its canonical identifier or any of its aliases,
    /// with or without leading dashes.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<OptionId> {
        self.resolver.find(name.trim_start_matches('-'))
    }

    /// Find an option by its canonical identifier only.
    #[must_use]
    pub fn find_identifier(&self, identifier: &str) -> Option<OptionId> {
        self.find(identifier)
            .filter(|&id| self.spec(id).identifier() == identifier.trim_start_matches('-'))
    }

    /// Get the spec for an option.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different [`OptionSet`].
    #[must_use]
    pub fn spec(&self, id: OptionId) -> &OptionSpec {
        &self.entries[id.index()].spec
    }

    #[must_use]
    pub fn identifier(&self, id: OptionId) -> &str {
        self.spec(id).identifier()
    }

    /// All of the options, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &OptionSpec)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (OptionId::new(index), &entry.spec))
    }

    /// The canonical identifiers of every option, in declaration order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.spec.identifier())
    }

    pub(crate) fn dependencies(&self, id: OptionId) -> &[OptionId] {
        &self.entries[id.index()].dependencies
    }

    pub(crate) fn resolve(&self, name: Name<'_>, mode: Mode) -> Option<OptionId> {
        self.resolver.resolve(name, mode)
    }
}

fn check_validators(spec: &OptionSpec) -> Result<(), SpecError> {
    let not_allowed = |which| SpecError::ValidatorNotAllowed {
        option: spec.identifier().to_owned(),
        kind: spec.kind(),
        which,
    };

    match spec.validators() {
        (Some(_), _) if !spec.kind().takes_value() => Err(not_allowed("validator")),
        (_, Some(_)) if spec.kind() != Kind::Keypair => Err(not_allowed("key validator")),
        _ => Ok(()),
    }
}

fn check_default(spec: &OptionSpec) -> Result<(), SpecError> {
    let Some(default) = spec.declared_default() else {
        return Ok(());
    };

    if default.kind() != spec.kind() {
        return Err(SpecError::DefaultKind {
            option: spec.identifier().to_owned(),
            kind: spec.kind(),
            found: default.kind(),
        });
    }

    spec.check(default)
        .map_err(|value| SpecError::InvalidDefault {
            option: spec.identifier().to_owned(),
            value,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Validator, Value};

    #[test]
    fn registers_in_order() {
        let set = OptionSet::new([
            OptionSpec::switch("--force|f"),
            OptionSpec::list("lib|L"),
        ])
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.identifiers().collect::<Vec<_>>(), ["force", "lib"]);
        assert_eq!(set.find("-L"), Some(OptionId::new(1)));
        assert_eq!(set.find_identifier("L"), None);
        assert_eq!(set.find_identifier("--lib"), Some(OptionId::new(1)));
    }

    #[test]
    fn rejects_bad_names() {
        for names in ["", "dry-run", "---x", "a||b", "a b"] {
            let error = OptionSet::new([OptionSpec::switch(names)]).unwrap_err();
            assert!(
                matches!(error, SpecError::InvalidName { .. }),
                "{names:?}: {error:?}"
            );
        }
    }

    #[test]
    fn rejects_duplicates_after_dash_stripping() {
        let error = OptionSet::new([
            OptionSpec::switch("--verbose|v"),
            OptionSpec::counter("-v"),
        ])
        .unwrap_err();

        assert_eq!(
            error,
            SpecError::DuplicateName {
                name: "-v".to_owned(),
                existing: "verbose".to_owned(),
            }
        );

        let error = OptionSet::new([OptionSpec::switch("x|--x")]).unwrap_err();
        assert!(matches!(error, SpecError::DuplicateName { .. }));
    }

    #[test]
    fn rejects_unknown_dependency() {
        let error = OptionSet::new([OptionSpec::parameter("input").needs("output")]).unwrap_err();

        assert_eq!(
            error,
            SpecError::UnknownDependency {
                option: "input".to_owned(),
                dependency: "output".to_owned(),
            }
        );
    }

    #[test]
    fn dependencies_resolve_through_aliases() {
        let set = OptionSet::new([
            OptionSpec::parameter("input").needs("--o"),
            OptionSpec::parameter("output|o"),
        ])
        .unwrap();

        assert_eq!(set.dependencies(OptionId::new(0)), [OptionId::new(1)]);
    }

    #[test]
    fn rejects_bad_defaults() {
        let error = OptionSet::new([OptionSpec::counter("n").default(true)]).unwrap_err();
        assert!(matches!(error, SpecError::DefaultKind { .. }));

        let error = OptionSet::new([OptionSpec::list("lib")
            .validator(Validator::pattern("^/").unwrap())
            .default(["/usr", "relative"])])
        .unwrap_err();

        assert_eq!(
            error,
            SpecError::InvalidDefault {
                option: "lib".to_owned(),
                value: "relative".to_owned(),
            }
        );
    }

    #[test]
    fn rejects_validators_on_flags() {
        let error = OptionSet::new([OptionSpec::switch("force")
            .validator(Validator::predicate(|_| true))])
        .unwrap_err();
        assert!(matches!(error, SpecError::ValidatorNotAllowed { .. }));

        let error = OptionSet::new([OptionSpec::list("lib")
            .key_validator(Validator::predicate(|_| true))])
        .unwrap_err();
        assert!(matches!(error, SpecError::ValidatorNotAllowed { .. }));
    }

    #[test]
    fn valid_default_is_kept() {
        let set = OptionSet::new([OptionSpec::counter("verbose").default(2u64)]).unwrap();
        assert_eq!(set.spec(OptionId::new(0)).default_value(), Value::Counter(2));
    }
}
