//! Creature definitions

use crate::edition::Edition;
use crate::edition::Edition::{Ab, Hota, Roe};

/// Creature type information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Creature {
    pub id: u32,
    pub name: &'static str,
    pub since: Edition,
}

impl Creature {
    const fn new(id: u32, name: &'static str, since: Edition) -> Self {
        Creature { id, name, since }
    }
}

/// All creature types, by savefile id
pub const CREATURES: &[Creature] = &[
    // The Restoration of Erathia
    Creature::new(0, "Pikeman", Roe),
    Creature::new(1, "Halberdier", Roe),
    Creature::new(2, "Archer", Roe),
    Creature::new(3, "Marksman", Roe),
    Creature::new(4, "Griffin", Roe),
    Creature::new(5, "Royal Griffin", Roe),
    Creature::new(6, "Swordsman", Roe),
    Creature::new(7, "Crusader", Roe),
    Creature::new(8, "Monk", Roe),
    Creature::new(9, "Zealot", Roe),
    Creature::new(10, "Cavalier", Roe),
    Creature::new(11, "Champion", Roe),
    Creature::new(12, "Angel", Roe),
    Creature::new(13, "Archangel", Roe),
    Creature::new(14, "Centaur", Roe),
    Creature::new(15, "Centaur Captain", Roe),
    Creature::new(16, "Dwarf", Roe),
    Creature::new(17, "Battle Dwarf", Roe),
    Creature::new(18, "Wood Elf", Roe),
    Creature::new(19, "Grand Elf", Roe),
    Creature::new(20, "Pegasus", Roe),
    Creature::new(21, "Silver Pegasus", Roe),
    Creature::new(22, "Dendroid Guard", Roe),
    Creature::new(23, "Dendroid Soldier", Roe),
    Creature::new(24, "Unicorn", Roe),
    Creature::new(25, "War Unicorn", Roe),
    Creature::new(26, "Green Dragon", Roe),
    Creature::new(27, "Gold Dragon", Roe),
    Creature::new(28, "Gremlin", Roe),
    Creature::new(29, "Master Gremlin", Roe),
    Creature::new(30, "Stone Gargoyle", Roe),
    Creature::new(31, "Obsidian Gargoyle", Roe),
    Creature::new(32, "Stone Golem", Roe),
    Creature::new(33, "Iron Golem", Roe),
    Creature::new(34, "Mage", Roe),
    Creature::new(35, "Arch Mage", Roe),
    Creature::new(36, "Genie", Roe),
    Creature::new(37, "Master Genie", Roe),
    Creature::new(38, "Naga", Roe),
    Creature::new(39, "Naga Queen", Roe),
    Creature::new(40, "Giant", Roe),
    Creature::new(41, "Titan", Roe),
    Creature::new(42, "Imp", Roe),
    Creature::new(43, "Familiar", Roe),
    Creature::new(44, "Gog", Roe),
    Creature::new(45, "Magog", Roe),
    Creature::new(46, "Hell Hound", Roe),
    Creature::new(47, "Cerberus", Roe),
    Creature::new(48, "Demon", Roe),
    Creature::new(49, "Horned Demon", Roe),
    Creature::new(50, "Pit Fiend", Roe),
    Creature::new(51, "Pit Lord", Roe),
    Creature::new(52, "Efreeti", Roe),
    Creature::new(53, "Efreet Sultan", Roe),
    Creature::new(54, "Devil", Roe),
    Creature::new(55, "Arch Devil", Roe),
    Creature::new(56, "Skeleton", Roe),
    Creature::new(57, "Skeleton Warrior", Roe),
    Creature::new(58, "Walking Dead", Roe),
    Creature::new(59, "Zombie", Roe),
    Creature::new(60, "Wight", Roe),
    Creature::new(61, "Wraith", Roe),
    Creature::new(62, "Vampire", Roe),
    Creature::new(63, "Vampire Lord", Roe),
    Creature::new(64, "Lich", Roe),
    Creature::new(65, "Power Lich", Roe),
    Creature::new(66, "Black Knight", Roe),
    Creature::new(67, "Dread Knight", Roe),
    Creature::new(68, "Bone Dragon", Roe),
    Creature::new(69, "Ghost Dragon", Roe),
    Creature::new(70, "Troglodyte", Roe),
    Creature::new(71, "Infernal Troglodyte", Roe),
    Creature::new(72, "Harpy", Roe),
    Creature::new(73, "Harpy Hag", Roe),
    Creature::new(74, "Beholder", Roe),
    Creature::new(75, "Evil Eye", Roe),
    Creature::new(76, "Medusa", Roe),
    Creature::new(77, "Medusa Queen", Roe),
    Creature::new(78, "Minotaur", Roe),
    Creature::new(79, "Minotaur King", Roe),
    Creature::new(80, "Manticore", Roe),
    Creature::new(81, "Scorpicore", Roe),
    Creature::new(82, "Red Dragon", Roe),
    Creature::new(83, "Black Dragon", Roe),
    Creature::new(84, "Goblin", Roe),
    Creature::new(85, "Hobgoblin", Roe),
    Creature::new(86, "Wolf Rider", Roe),
    Creature::new(87, "Wolf Raider", Roe),
    Creature::new(88, "Orc", Roe),
    Creature::new(89, "Orc Chieftain", Roe),
    Creature::new(90, "Ogre", Roe),
    Creature::new(91, "Ogre Mage", Roe),
    Creature::new(92, "Roc", Roe),
    Creature::new(93, "Thunderbird", Roe),
    Creature::new(94, "Cyclops", Roe),
    Creature::new(95, "Cyclops King", Roe),
    Creature::new(96, "Behemoth", Roe),
    Creature::new(97, "Ancient Behemoth", Roe),
    Creature::new(98, "Gnoll", Roe),
    Creature::new(99, "Gnoll Marauder", Roe),
    Creature::new(100, "Lizardman", Roe),
    Creature::new(101, "Lizard Warrior", Roe),
    Creature::new(102, "Gorgon", Roe),
    Creature::new(103, "Mighty Gorgon", Roe),
    Creature::new(104, "Serpent Fly", Roe),
    Creature::new(105, "Dragon Fly", Roe),
    Creature::new(106, "Basilisk", Roe),
    Creature::new(107, "Greater Basilisk", Roe),
    Creature::new(108, "Wyvern", Roe),
    Creature::new(109, "Wyvern Monarch", Roe),
    Creature::new(110, "Hydra", Roe),
    Creature::new(111, "Chaos Hydra", Roe),
    Creature::new(112, "Air Elemental", Roe),
    Creature::new(113, "Earth Elemental", Roe),
    Creature::new(114, "Fire Elemental", Roe),
    Creature::new(115, "Water Elemental", Roe),
    Creature::new(116, "Gold Golem", Roe),
    Creature::new(117, "Diamond Golem", Roe),
    Creature::new(138, "Halfling", Roe),
    Creature::new(139, "Peasant", Roe),
    Creature::new(140, "Boar", Roe),
    Creature::new(141, "Mummy", Roe),
    Creature::new(142, "Nomad", Roe),
    Creature::new(143, "Rogue", Roe),
    Creature::new(144, "Troll", Roe),
    // Armageddon's Blade: Conflux and new neutrals
    Creature::new(118, "Pixie", Ab),
    Creature::new(119, "Sprite", Ab),
    Creature::new(120, "Psychic Elemental", Ab),
    Creature::new(121, "Magic Elemental", Ab),
    Creature::new(123, "Ice Elemental", Ab),
    Creature::new(125, "Magma Elemental", Ab),
    Creature::new(127, "Storm Elemental", Ab),
    Creature::new(129, "Energy Elemental", Ab),
    Creature::new(130, "Firebird", Ab),
    Creature::new(131, "Phoenix", Ab),
    Creature::new(132, "Azure Dragon", Ab),
    Creature::new(133, "Crystal Dragon", Ab),
    Creature::new(134, "Faerie Dragon", Ab),
    Creature::new(135, "Rust Dragon", Ab),
    Creature::new(136, "Enchanter", Ab),
    Creature::new(137, "Sharpshooter", Ab),
    // Horn of the Abyss: Cove and new neutrals
    Creature::new(151, "Nymph", Hota),
    Creature::new(152, "Oceanid", Hota),
    Creature::new(153, "Crew Mate", Hota),
    Creature::new(154, "Seaman", Hota),
    Creature::new(155, "Pirate", Hota),
    Creature::new(156, "Corsair", Hota),
    Creature::new(157, "Sea Dog", Hota),
    Creature::new(158, "Stormbird", Hota),
    Creature::new(159, "Ayssid", Hota),
    Creature::new(160, "Sea Witch", Hota),
    Creature::new(161, "Sorceress", Hota),
    Creature::new(162, "Nix", Hota),
    Creature::new(163, "Nix Warrior", Hota),
    Creature::new(164, "Sea Serpent", Hota),
    Creature::new(165, "Haspid", Hota),
    Creature::new(166, "Satyr", Hota),
    Creature::new(167, "Fangarm", Hota),
    Creature::new(168, "Leprechaun", Hota),
    Creature::new(169, "Steel Golem", Hota),
];

/// Get creature by savefile id
pub fn creature_by_id(id: u32) -> Option<&'static Creature> {
    CREATURES.iter().find(|c| c.id == id)
}

/// Get creature by name (case-insensitive)
pub fn creature_by_name(name: &str) -> Option<&'static Creature> {
    let name = name.trim();
    CREATURES.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Creatures that exist in an edition
pub fn creatures_for(edition: Edition) -> impl Iterator<Item = &'static Creature> {
    CREATURES
        .iter()
        .filter(move |c| super::available_in(c.since, edition))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creature_lookup() {
        assert_eq!(creature_by_id(0).map(|c| c.name), Some("Pikeman"));
        assert_eq!(creature_by_name("royal griffin").map(|c| c.id), Some(5));
        assert!(creature_by_id(122).is_none());
    }

    #[test]
    fn test_creatures_for_edition() {
        let roe: Vec<_> = creatures_for(Edition::Roe).collect();
        assert!(roe.iter().any(|c| c.name == "Troll"));
        assert!(!roe.iter().any(|c| c.name == "Pixie"));
        assert!(creatures_for(Edition::Hota).any(|c| c.name == "Nix Warrior"));
        assert!(!creatures_for(Edition::Sod).any(|c| c.name == "Nix Warrior"));
    }
}
