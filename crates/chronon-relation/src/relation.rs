//! Catalogue of named relations

use std::fmt;

/// Binary relation between two temporal objects, read as `a REL b`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    // Allen base relations
    Equals,
    Before,
    After,
    Meets,
    MetBy,
    Overlaps,
    OverlappedBy,
    Starts,
    StartedBy,
    Finishes,
    FinishedBy,
    During,
    Contains,

    // Partial overlaps and alignment
    OverlapsStart,
    OverlapsEnd,
    IsHeadToHeadWith,
    IsTailToTailWith,

    // Compound
    Disjunct,
    ContemporaryOf,
    Lte,

    // Age (start only)
    Older,
    IsOlderThan,
    Younger,
    IsYoungerThan,

    // Survivorship (start only)
    Survives,
    IsSurvivedBy,

    // Contemporaries
    YoungerContemporaryOf,
    SurvivingContemporaryOf,
    SurvivedByContemporaryOf,

    // Birth against termination
    IsForgedBeforeTerminationOf,
    TerminatedAfterBirthOf,

    /// Always `Nothing`
    Nothing,
}

impl Relation {
    pub const ALL: [Relation; 32] = [
        Relation::Equals,
        Relation::Before,
        Relation::After,
        Relation::Meets,
        Relation::MetBy,
        Relation::Overlaps,
        Relation::OverlappedBy,
        Relation::Starts,
        Relation::StartedBy,
        Relation::Finishes,
        Relation::FinishedBy,
        Relation::During,
        Relation::Contains,
        Relation::OverlapsStart,
        Relation::OverlapsEnd,
        Relation::IsHeadToHeadWith,
        Relation::IsTailToTailWith,
        Relation::Disjunct,
        Relation::ContemporaryOf,
        Relation::Lte,
        Relation::Older,
        Relation::IsOlderThan,
        Relation::Younger,
        Relation::IsYoungerThan,
        Relation::Survives,
        Relation::IsSurvivedBy,
        Relation::YoungerContemporaryOf,
        Relation::SurvivingContemporaryOf,
        Relation::SurvivedByContemporaryOf,
        Relation::IsForgedBeforeTerminationOf,
        Relation::TerminatedAfterBirthOf,
        Relation::Nothing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Relation::Equals => "equals",
            Relation::Before => "before",
            Relation::After => "after",
            Relation::Meets => "meets",
            Relation::MetBy => "metBy",
            Relation::Overlaps => "overlaps",
            Relation::OverlappedBy => "overlappedBy",
            Relation::Starts => "starts",
            Relation::StartedBy => "startedBy",
            Relation::Finishes => "finishes",
            Relation::FinishedBy => "finishedBy",
            Relation::During => "during",
            Relation::Contains => "contains",
            Relation::OverlapsStart => "overlapsStart",
            Relation::OverlapsEnd => "overlapsEnd",
            Relation::IsHeadToHeadWith => "isHeadToHeadWith",
            Relation::IsTailToTailWith => "isTailToTailWith",
            Relation::Disjunct => "disjunct",
            Relation::ContemporaryOf => "contemporaryOf",
            Relation::Lte => "lte",
            Relation::Older => "older",
            Relation::IsOlderThan => "isOlderThan",
            Relation::Younger => "younger",
            Relation::IsYoungerThan => "isYoungerThan",
            Relation::Survives => "survives",
            Relation::IsSurvivedBy => "isSurvivedBy",
            Relation::YoungerContemporaryOf => "youngerContemporaryOf",
            Relation::SurvivingContemporaryOf => "survivingContemporaryOf",
            Relation::SurvivedByContemporaryOf => "survivedByContemporaryOf",
            Relation::IsForgedBeforeTerminationOf => "isForgedBeforeTerminationOf",
            Relation::TerminatedAfterBirthOf => "terminatedAfterBirthOf",
            Relation::Nothing => "nothing",
        }
    }

    /// Relation `c` such that `a self b == b c a`, when one is named
    pub fn converse(self) -> Option<Relation> {
        let converse = match self {
            Relation::Equals => Relation::Equals,
            Relation::Before => Relation::After,
            Relation::After => Relation::Before,
            Relation::Meets => Relation::MetBy,
            Relation::MetBy => Relation::Meets,
            Relation::Overlaps => Relation::OverlappedBy,
            Relation::OverlappedBy => Relation::Overlaps,
            Relation::Starts => Relation::StartedBy,
            Relation::StartedBy => Relation::Starts,
            Relation::Finishes => Relation::FinishedBy,
            Relation::FinishedBy => Relation::Finishes,
            Relation::During => Relation::Contains,
            Relation::Contains => Relation::During,
            Relation::IsHeadToHeadWith => Relation::IsHeadToHeadWith,
            Relation::IsTailToTailWith => Relation::IsTailToTailWith,
            Relation::Disjunct => Relation::Disjunct,
            Relation::ContemporaryOf => Relation::ContemporaryOf,
            Relation::Older => Relation::Younger,
            Relation::Younger => Relation::Older,
            Relation::IsOlderThan => Relation::IsYoungerThan,
            Relation::IsYoungerThan => Relation::IsOlderThan,
            Relation::Survives => Relation::IsSurvivedBy,
            Relation::IsSurvivedBy => Relation::Survives,
            Relation::IsForgedBeforeTerminationOf => Relation::TerminatedAfterBirthOf,
            Relation::TerminatedAfterBirthOf => Relation::IsForgedBeforeTerminationOf,
            Relation::Nothing => Relation::Nothing,
            Relation::OverlapsStart
            | Relation::OverlapsEnd
            | Relation::Lte
            | Relation::YoungerContemporaryOf
            | Relation::SurvivingContemporaryOf
            | Relation::SurvivedByContemporaryOf => return None,
        };
        Some(converse)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Relation between a temporal object and a bare instant, read as `a REL t`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointRelation {
    /// start <= t < end
    Within,
    /// start <= t <= end
    ContainsDate,
    /// start < t < end
    ContainsDateStrict,
}

impl PointRelation {
    pub const ALL: [PointRelation; 3] = [
        PointRelation::Within,
        PointRelation::ContainsDate,
        PointRelation::ContainsDateStrict,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PointRelation::Within => "within",
            PointRelation::ContainsDate => "containsDate",
            PointRelation::ContainsDateStrict => "containsDateStrict",
        }
    }
}

impl fmt::Display for PointRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_unique() {
        let names: HashSet<_> = Relation::ALL.iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), Relation::ALL.len());
    }

    #[test]
    fn test_converse_is_involution() {
        for r in Relation::ALL {
            if let Some(c) = r.converse() {
                assert_eq!(c.converse(), Some(r), "{}", r);
            }
        }
    }
}
