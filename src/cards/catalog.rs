//! The card catalog: name grammar and default decks.
//!
//! Every card is defined by its name. Crystal amounts are written as four
//! digits in descending type order: pink, blue, green, yellow. So
//! `0012` is one Green and two Yellow.
//!
//! | Name | Card |
//! |---|---|
//! | `mint_PBGY` | Produce the digits |
//! | `upgrade_N` | Upgrade budget `N` (2 or 3) |
//! | `trade_PBGY_PBGY` | Trade input for output |
//! | `action_PBGY_PBGY` | Produce if input is empty, else Trade |
//! | `golem_PBGY` | Point card with that requirement |
//! | `coin_N` | Bonus token worth `N` |
//! | `stone_<colour>` | Stone artwork |
//! | `<name>_bg` | Background artwork |

use crate::core::resources::{CrystalType, Resources};

use super::card::{ActionCard, ActionEffect, CardKind, PointCard};

/// The action deck.
pub const ACTION_CARDS: &[&str] = &[
    "mint_0003",
    "mint_0004",
    "mint_0011",
    "mint_0012",
    "mint_0020",
    "mint_0100",
    "mint_0101",
    "mint_1000",
    "upgrade_3",
    "trade_0002_0020",
    "trade_0002_0100",
    "trade_0003_0030",
    "trade_0003_0110",
    "trade_0003_1000",
    "trade_0004_0200",
    "trade_0004_1100",
    "trade_0005_0300",
    "trade_0005_2000",
    "trade_0010_0003",
    "trade_0011_1000",
    "trade_0020_0103",
    "trade_0020_0200",
    "trade_0020_1002",
    "trade_0030_0202",
    "trade_0030_0300",
    "trade_0030_1101",
    "trade_0030_2000",
    "trade_0100_0014",
    "trade_0100_0020",
    "trade_0100_0021",
    "trade_0200_0032",
    "trade_0200_1012",
    "trade_0200_1020",
    "trade_0200_2000",
    "trade_0300_3000",
    "trade_1000_0022",
    "trade_1000_0030",
    "trade_1000_0103",
    "trade_1000_0111",
    "trade_1000_0200",
    "trade_1002_2000",
    "trade_2000_0230",
    "trade_2000_0311",
];

/// The golem deck.
pub const POINT_CARDS: &[&str] = &[
    "golem_0022",
    "golem_0023",
    "golem_0032",
    "golem_0040",
    "golem_0050",
    "golem_0202",
    "golem_0203",
    "golem_0220",
    "golem_0222",
    "golem_0230",
    "golem_0302",
    "golem_0320",
    "golem_0400",
    "golem_0500",
    "golem_1012",
    "golem_1111",
    "golem_1113",
    "golem_1120",
    "golem_1131",
    "golem_1201",
    "golem_1311",
    "golem_2002",
    "golem_2003",
    "golem_2020",
    "golem_2022",
    "golem_2030",
    "golem_2200",
    "golem_2202",
    "golem_2220",
    "golem_2300",
    "golem_3002",
    "golem_3020",
    "golem_3111",
    "golem_3200",
    "golem_4000",
    "golem_5000",
];

/// Every seat starts with these in hand.
pub const STARTING_CARDS: &[&str] = &["mint_0002", "upgrade_2"];

/// Coin stacks in market order: bronze (position 0), silver (position 1).
pub const COIN_CARDS: &[&str] = &["coin_3", "coin_1"];

/// Stone artwork, one per crystal type.
pub const STONE_CARDS: &[&str] = &["stone_yellow", "stone_green", "stone_blue", "stone_pink"];

/// Table artwork.
pub const BACKGROUND_CARDS: &[&str] = &["golem_bg", "merchant_bg"];

/// Parse a card name into its kind. Returns `None` for names outside the
/// grammar.
///
/// ```
/// use golem_caravan::cards::{catalog, CardKind};
///
/// let golem = catalog::parse_card("golem_0022");
/// assert!(matches!(golem, Some(CardKind::Point(p)) if p.points == 8));
/// assert!(catalog::parse_card("dragon_9").is_none());
/// ```
#[must_use]
pub fn parse_card(name: &str) -> Option<CardKind> {
    if let Some(points) = name.strip_prefix("coin_") {
        return points.parse().ok().map(|points| CardKind::Coin { points });
    }
    if let Some(colour) = name.strip_prefix("stone_") {
        return parse_colour(colour).map(|crystal| CardKind::Stone { crystal });
    }
    if name.ends_with("_bg") {
        return Some(CardKind::Background);
    }
    if let Some(digits) = name.strip_prefix("golem_") {
        let requirement = parse_crystals(digits)?;
        return Some(CardKind::Point(PointCard {
            requirement,
            points: golem_points(&requirement),
        }));
    }

    let (prefix, rest) = name.split_once('_')?;
    let action = match prefix {
        "mint" => produce(parse_crystals(rest)?),
        "upgrade" => {
            let budget = rest.parse::<u32>().ok().filter(|n| (2..=3).contains(n)).unwrap_or(2);
            ActionCard {
                cost: Resources::empty(),
                effect: ActionEffect::Upgrade { turn_upgrade: budget },
            }
        }
        "trade" => {
            let (input, output) = parse_pair(rest)?;
            trade(input, output)
        }
        "action" => {
            let (input, output) = parse_pair(rest)?;
            if input.is_empty() {
                produce(output)
            } else {
                trade(input, output)
            }
        }
        _ => return None,
    };
    Some(CardKind::Action(action))
}

/// Golem value: requirement level sum plus a bonus of at least 2.
///
/// The bonus counts one for three or more colours, one more for all four,
/// and one for a six-crystal requirement.
#[must_use]
pub fn golem_points(requirement: &Resources) -> u32 {
    let colours = CrystalType::ALL
        .iter()
        .filter(|&&c| requirement.get(c) > 0)
        .count();
    let mut bonus: u32 = 0;
    if colours >= 3 {
        bonus += 1;
    }
    if colours >= 4 {
        bonus += 1;
    }
    if requirement.total() == 6 {
        bonus += 1;
    }
    requirement.level_sum() + bonus.max(2)
}

fn produce(output: Resources) -> ActionCard {
    ActionCard {
        cost: Resources::of(CrystalType::Yellow, (output.total() / 2).max(1)),
        effect: ActionEffect::Produce { output },
    }
}

fn trade(input: Resources, output: Resources) -> ActionCard {
    ActionCard {
        cost: Resources::of(CrystalType::Yellow, input.total()),
        effect: ActionEffect::Trade { input, output },
    }
}

fn parse_pair(s: &str) -> Option<(Resources, Resources)> {
    let (input, output) = s.split_once('_')?;
    Some((parse_crystals(input)?, parse_crystals(output)?))
}

/// Parse `PBGY` digits.
fn parse_crystals(digits: &str) -> Option<Resources> {
    let bytes = digits.as_bytes();
    if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let n = |i: usize| u32::from(bytes[i] - b'0');
    Some(Resources::new(n(3), n(2), n(1), n(0)))
}

fn parse_colour(colour: &str) -> Option<CrystalType> {
    match colour {
        "yellow" => Some(CrystalType::Yellow),
        "green" => Some(CrystalType::Green),
        "blue" => Some(CrystalType::Blue),
        "pink" => Some(CrystalType::Pink),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(name: &str) -> ActionCard {
        match parse_card(name) {
            Some(CardKind::Action(card)) => card,
            other => panic!("{} parsed as {:?}", name, other),
        }
    }

    fn golem(name: &str) -> PointCard {
        match parse_card(name) {
            Some(CardKind::Point(card)) => card,
            other => panic!("{} parsed as {:?}", name, other),
        }
    }

    #[test]
    fn test_every_catalog_name_parses() {
        let all = ACTION_CARDS
            .iter()
            .chain(POINT_CARDS)
            .chain(STARTING_CARDS)
            .chain(COIN_CARDS)
            .chain(STONE_CARDS)
            .chain(BACKGROUND_CARDS);
        for name in all {
            assert!(parse_card(name).is_some(), "{} did not parse", name);
        }
        assert_eq!(ACTION_CARDS.len(), 43);
        assert_eq!(POINT_CARDS.len(), 36);
    }

    #[test]
    fn test_digit_order() {
        assert_eq!(parse_crystals("0012"), Some(Resources::new(2, 1, 0, 0)));
        assert_eq!(parse_crystals("1000"), Some(Resources::new(0, 0, 0, 1)));
        assert_eq!(parse_crystals("12"), None);
        assert_eq!(parse_crystals("00a1"), None);
    }

    #[test]
    fn test_mint() {
        let card = action("mint_0002");
        assert_eq!(
            card.effect,
            ActionEffect::Produce { output: Resources::new(2, 0, 0, 0) }
        );
        assert_eq!(card.cost, Resources::new(1, 0, 0, 0));

        assert_eq!(action("mint_0004").cost, Resources::new(2, 0, 0, 0));
        assert_eq!(action("mint_1000").cost, Resources::new(1, 0, 0, 0));
    }

    #[test]
    fn test_upgrade_budget_clamped() {
        assert_eq!(action("upgrade_3").effect, ActionEffect::Upgrade { turn_upgrade: 3 });
        assert_eq!(action("upgrade_2").effect, ActionEffect::Upgrade { turn_upgrade: 2 });
        assert_eq!(action("upgrade_7").effect, ActionEffect::Upgrade { turn_upgrade: 2 });
        assert!(action("upgrade_3").cost.is_empty());
    }

    #[test]
    fn test_trade() {
        let card = action("trade_0002_0100");
        assert_eq!(
            card.effect,
            ActionEffect::Trade {
                input: Resources::new(2, 0, 0, 0),
                output: Resources::new(0, 0, 1, 0),
            }
        );
        assert_eq!(card.cost, Resources::new(2, 0, 0, 0));
    }

    #[test]
    fn test_generic_action_names() {
        assert_eq!(
            action("action_0000_0011").effect,
            ActionEffect::Produce { output: Resources::new(1, 1, 0, 0) }
        );
        assert_eq!(action("action_0030_0100").effect.action_type(), crate::cards::ActionType::Trade);
    }

    #[test]
    fn test_golem_points() {
        assert_eq!(golem("golem_0022").points, 6 + 2);
        assert_eq!(golem("golem_1111").points, 10 + 2);
        // three colours and six crystals
        assert_eq!(golem("golem_0222").points, 12 + 2);
        // four colours and six crystals
        assert_eq!(golem("golem_1113").points, 12 + 3);
        assert_eq!(golem("golem_5000").points, 20 + 2);
        assert_eq!(golem("golem_0022").requirement, Resources::new(2, 2, 0, 0));
    }

    #[test]
    fn test_other_kinds() {
        assert_eq!(parse_card("coin_3"), Some(CardKind::Coin { points: 3 }));
        assert_eq!(
            parse_card("stone_blue"),
            Some(CardKind::Stone { crystal: CrystalType::Blue })
        );
        assert_eq!(parse_card("golem_bg"), Some(CardKind::Background));
        assert_eq!(parse_card("stone_red"), None);
        assert_eq!(parse_card("wizard_0001"), None);
        assert_eq!(parse_card("trade_0002"), None);
    }
}
