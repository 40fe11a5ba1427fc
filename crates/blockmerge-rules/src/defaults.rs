//! Built-in rule tables for the flattening-era block renames

use crate::categorical::{CategoricalRule, Guard, Resolve};
use crate::family::PrefixFamily;

const COLORS: [&str; 16] = [
    "white",
    "orange",
    "magenta",
    "light_blue",
    "yellow",
    "lime",
    "pink",
    "gray",
    "light_gray",
    "cyan",
    "purple",
    "blue",
    "brown",
    "green",
    "red",
    "black",
];

// Bare names that collide with unrelated old blocks once the color is gone.
const COLOR_EXCLUSIONS: [&str; 6] = [
    "nether_bricks",
    "sandstone_slab",
    "tulip",
    "orchid",
    "sand",
    "ice",
];

const WOOD_TYPES: [&str; 12] = [
    "jungle",
    "oak",
    "dark_oak",
    "birch",
    "spruce",
    "acacia",
    "stripped_jungle",
    "stripped_oak",
    "stripped_dark_oak",
    "stripped_birch",
    "stripped_spruce",
    "stripped_acacia",
];

const ALIASES: [(&str, &str); 27] = [
    ("nether_bricks", "nether_brick"),
    ("wet_sponge", "sponge"),
    ("cobweb", "web"),
    ("spawner", "mob_spawner"),
    ("wall_torch", "torch"),
    ("carved_pumpkin", "pumpkin"),
    ("jack_o_lantern", "lit_pumpkin"),
    ("sugar_cane", "reeds"),
    ("powered_rail", "golden_rail"),
    ("nether_portal", "portal"),
    ("terracotta", "white_glazed_terracotta"),
    ("fern", "tallgrass"),
    ("dead_bush", "deadbush"),
    ("melon", "melon_block"),
    ("mushroom_stem", "red_mushroom_block"),
    ("sign", "standing_sign"),
    ("snow_block", "snow"),
    ("moving_piston", "piston_extension"),
    ("repeater", "powered_repeater"),
    ("comparator", "powered_comparator"),
    ("lily_pad", "waterlily"),
    ("dark_prismarine", "prismarine"),
    ("prismarine_bricks", "prismarine"),
    ("damaged_anvil", "anvil"),
    ("chipped_anvil", "anvil"),
    ("shulker_box", "white_shulker_box"),
    ("slime_block", "slime"),
];

pub(crate) fn colors() -> PrefixFamily {
    PrefixFamily::new(COLORS)
        .with_exclusions(COLOR_EXCLUSIONS)
        .with_rename("banner", "standing_banner")
        .with_rename("terracotta", "white_glazed_terracotta")
}

pub(crate) fn materials() -> PrefixFamily {
    PrefixFamily::new(WOOD_TYPES)
        .with_rename("wood", "log")
        .with_rename("door", "wooden_door")
        .with_rename("pressure_plate", "wooden_pressure_plate")
        .with_rename("button", "wooden_button")
        .with_rename("slab", "stone_slab")
}

fn family(guard: Guard, to: &str) -> CategoricalRule {
    CategoricalRule::new(guard, Resolve::To(to.to_string()))
}

// Order is significant: the first matching guard decides. The red_flower
// group is fully shadowed by the prismarine group above it.
pub(crate) fn categorical() -> Vec<CategoricalRule> {
    let mut rules = vec![
        family(Guard::StartsWith("potted_".into()), "flower_pot"),
        family(Guard::StartsWith("attached_".into()), "melon_stem"),
        family(Guard::EndsWith("_slab".into()), "stone_slab"),
        family(Guard::EndsWith("_skull".into()), "skull"),
        family(Guard::EndsWith("_head".into()), "skull"),
        family(Guard::EndsWith("_stairs".into()), "stone_stairs"),
        family(Guard::Contains("stone_bricks".into()), "stonebrick"),
        CategoricalRule::alias("smooth_quartz", "quartz_block"),
        CategoricalRule::alias("quartz_pillar", "quartz_block"),
        CategoricalRule::drop_prefix("cut_"),
        CategoricalRule::drop_prefix("chiseled_"),
        CategoricalRule::drop_prefix("smooth_"),
        CategoricalRule::drop_prefix("infested_"),
        CategoricalRule::drop_prefix("mossy_"),
        CategoricalRule::group(
            &["dandelion", "poppy", "allium", "azure_bluet", "oxeye_daisy", "peony"],
            "prismarine",
        ),
        CategoricalRule::group(&["large_fern", "rose_bush", "lilac", "sunflower"], "double_plant"),
        CategoricalRule::group(
            &["dandelion", "poppy", "allium", "azure_bluet", "oxeye_daisy"],
            "red_flower",
        ),
        CategoricalRule::group(
            &[
                "granite",
                "diorite",
                "andesite",
                "polished_granite",
                "polished_diorite",
                "polished_andesite",
            ],
            "stone",
        ),
        CategoricalRule::group(&["grass_block", "coarse_dirt", "podzol"], "grass"),
    ];

    rules.extend(ALIASES.iter().map(|(from, to)| CategoricalRule::alias(from, to)));
    rules
}
