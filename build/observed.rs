use std::fmt::Display;

const WEEKDAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

// Named rules as weekday shift tokens; unlisted weekdays keep their date.
const NAMED_RULES: &[(&str, &str)] = &[
    ("MON_TO_NEXT_TUE", "mon+1"),
    ("MON_ONLY", "tue=none wed=none thu=none fri=none sat=none sun=none"),
    ("TUE_TO_PREV_MON", "tue-1"),
    ("TUE_TO_PREV_FRI", "tue-4"),
    ("TUE_TO_NONE", "tue=none"),
    ("WED_TO_PREV_MON", "wed-2"),
    ("WED_TO_NEXT_FRI", "wed+2"),
    ("THU_TO_PREV_MON", "thu-3"),
    ("THU_TO_PREV_WED", "thu-1"),
    ("THU_TO_NEXT_MON", "thu+4"),
    ("THU_TO_NEXT_FRI", "thu+1"),
    ("FRI_TO_PREV_WED", "fri-2"),
    ("FRI_TO_PREV_THU", "fri-1"),
    ("FRI_TO_NEXT_MON", "fri+3"),
    ("FRI_TO_NEXT_TUE", "fri+4"),
    ("FRI_TO_NEXT_SAT", "fri+1"),
    ("FRI_TO_NEXT_WORKDAY", "fri=next"),
    ("FRI_ONLY", "mon=none tue=none wed=none thu=none sat=none sun=none"),
    ("SAT_TO_PREV_THU", "sat-2"),
    ("SAT_TO_PREV_FRI", "sat-1"),
    ("SAT_TO_PREV_WORKDAY", "sat=prev"),
    ("SAT_TO_NEXT_MON", "sat+2"),
    ("SAT_TO_NEXT_TUE", "sat+3"),
    ("SAT_TO_NEXT_SUN", "sat+1"),
    ("SAT_TO_NEXT_WORKDAY", "sat=next"),
    ("SAT_TO_NONE", "sat=none"),
    ("SUN_TO_NEXT_MON", "sun+1"),
    ("SUN_TO_NEXT_TUE", "sun+2"),
    ("SUN_TO_NEXT_WED", "sun+3"),
    ("SUN_TO_NEXT_WORKDAY", "sun=next"),
    ("SUN_TO_NONE", "sun=none"),
    ("ALL_TO_NEAREST_MON", "tue-1 wed-2 thu-3 fri+3 sat+2 sun+1"),
    ("ALL_TO_NEAREST_MON_LATAM", "tue-1 wed-2 thu+4 fri+3 sat+2 sun+1"),
    ("ALL_TO_NEXT_MON", "tue+6 wed+5 thu+4 fri+3 sat+2 sun+1"),
    ("ALL_TO_NEXT_SUN", "mon+6 tue+5 wed+4 thu+3 fri+2 sat+1"),
    ("WORKDAY_TO_NEAREST_MON", "tue-1 wed-2 thu-3 fri+3"),
    ("WORKDAY_TO_NEXT_MON", "tue+6 wed+5 thu+4 fri+3"),
    ("WORKDAY_TO_NEXT_WORKDAY", "mon=next tue=next wed=next thu=next fri=next"),
    ("MON_FRI_ONLY", "tue=none wed=none thu=none sat=none sun=none"),
    ("TUE_WED_TO_PREV_MON", "tue-1 wed-2"),
    ("TUE_WED_THU_TO_PREV_MON", "tue-1 wed-2 thu-3"),
    ("TUE_WED_THU_TO_NEXT_FRI", "tue+3 wed+2 thu+1"),
    ("WED_THU_TO_NEXT_FRI", "wed+2 thu+1"),
    ("THU_FRI_TO_NEXT_MON", "thu+4 fri+3"),
    ("THU_FRI_TO_NEXT_WORKDAY", "thu=next fri=next"),
    ("THU_FRI_SUN_TO_NEXT_MON", "thu+4 fri+3 sun+1"),
    ("FRI_SAT_TO_NEXT_WORKDAY", "fri=next sat=next"),
    ("FRI_SUN_TO_NEXT_MON", "fri+3 sun+1"),
    ("FRI_SUN_TO_NEXT_SAT_MON", "fri+1 sun+1"),
    ("SAT_SUN_TO_PREV_FRI", "sat-1 sun-2"),
    ("SAT_SUN_TO_NEXT_MON", "sat+2 sun+1"),
    ("SAT_SUN_TO_NEXT_TUE", "sat+3 sun+2"),
    ("SAT_SUN_TO_NEXT_WED", "sat+4 sun+3"),
    ("SAT_SUN_TO_NEXT_MON_TUE", "sat+2 sun+2"),
    ("SAT_SUN_TO_NEXT_WORKDAY", "sat=next sun=next"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Keep,
    Days(i8),
    NextWorkday,
    PrevWorkday,
    Remove,
}

impl Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shift::Keep => f.write_str("Shift::Keep"),
            Shift::Days(n) => write!(f, "Shift::Days({n})"),
            Shift::NextWorkday => f.write_str("Shift::NextWorkday"),
            Shift::PrevWorkday => f.write_str("Shift::PrevWorkday"),
            Shift::Remove => f.write_str("Shift::Remove"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule(pub [Shift; 7]);

impl Rule {
    pub const NONE: Rule = Rule([Shift::Keep; 7]);

    fn plus(mut self, other: Rule) -> Rule {
        for (shift, other) in self.0.iter_mut().zip(other.0) {
            if other != Shift::Keep {
                *shift = other;
            }
        }
        self
    }

    pub fn moves_to_workday(&self) -> bool {
        self.0
            .iter()
            .any(|it| matches!(it, Shift::NextWorkday | Shift::PrevWorkday))
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ObservedRule::new([")?;
        for (i, shift) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{shift}")?;
        }
        f.write_str("])")
    }
}

pub fn weekday_index(name: &str) -> Option<usize> {
    WEEKDAYS.iter().position(|it| *it == name)
}

/// Parses a single token: `NAME(+NAME)*` or `wd+N`, `wd-N`, `wd=next`,
/// `wd=prev`, `wd=none`.
pub fn parse_token(token: &str) -> Result<Rule, String> {
    if token.bytes().next().is_some_and(|it| it.is_ascii_uppercase()) {
        return token.split('+').try_fold(Rule::NONE, |rule, name| {
            let (_, tokens) = NAMED_RULES
                .iter()
                .find(|(it, _)| *it == name)
                .ok_or_else(|| format!("unknown observed rule {name}"))?;
            Ok(rule.plus(parse_tokens(tokens.split(' '))?))
        });
    }

    let weekday = token
        .get(..3)
        .and_then(weekday_index)
        .ok_or_else(|| format!("invalid observed rule token {token}"))?;
    let shift = match &token[3..] {
        "=next" => Shift::NextWorkday,
        "=prev" => Shift::PrevWorkday,
        "=none" => Shift::Remove,
        days => Shift::Days(
            days.strip_prefix('+')
                .unwrap_or(days)
                .parse()
                .map_err(|_| format!("invalid observed rule token {token}"))?,
        ),
    };
    let mut rule = Rule::NONE;
    rule.0[weekday] = shift;
    Ok(rule)
}

pub fn parse_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Result<Rule, String> {
    tokens
        .into_iter()
        .filter(|it| !it.is_empty())
        .try_fold(Rule::NONE, |rule, token| Ok(rule.plus(parse_token(token)?)))
}
